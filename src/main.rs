use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use multiversion_catalog::catalog::{VersionCatalog, Versions};
use multiversion_catalog::config::{self, CatalogConfig};
use multiversion_catalog::logging;

#[derive(Parser)]
#[command(name = "mv-catalog")]
#[command(version, about = "Query the version catalog of a multi-version documentation build")]
struct Cli {
    /// JSON metadata file written by the ref resolver
    #[arg(long)]
    metadata: PathBuf,

    /// Name of the version being rendered
    #[arg(long)]
    current: String,

    /// JSON catalog configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to a file instead of stderr (`--log-file=<FILE>`, defaults
    /// to the local data directory)
    #[arg(long, global = true, num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List version names in menu order
    List {
        #[arg(long, value_enum, default_value_t = View::All)]
        view: View,
    },
    /// Check whether a version has a page
    HasPage {
        #[arg(long)]
        page: String,
        version: String,
    },
    /// Print the link from a page of the current version to another version
    Link {
        #[arg(long)]
        page: String,
        version: String,
    },
    /// Print the template context of a page as JSON
    Context {
        #[arg(long)]
        page: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    All,
    Tags,
    Branches,
    Releases,
    InDevelopment,
}

impl View {
    fn select(self, catalog: &VersionCatalog) -> Versions<'_> {
        match self {
            View::All => catalog.versions(),
            View::Tags => catalog.tags(),
            View::Branches => catalog.branches(),
            View::Releases => catalog.releases(),
            View::InDevelopment => catalog.in_development(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .map(|path| path.unwrap_or_else(config::log_path));
    let _guard =
        logging::init_logging(logging::level_for_verbosity(cli.verbose), log_file.as_deref())?;

    let catalog_config = match &cli.config {
        Some(path) => CatalogConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    let metadata = cli.metadata.as_path();
    let catalog = VersionCatalog::from_path(metadata, cli.current.as_str())
        .with_context(|| format!("loading metadata {}", metadata.display()))?
        .with_config(catalog_config);

    match cli.command {
        Command::List { view } => {
            for version in view.select(&catalog) {
                println!("{}", version.name);
            }
        }
        Command::HasPage { page, version } => {
            println!("{}", catalog.has_page(&version, &page));
        }
        Command::Link { page, version } => {
            println!("{}", catalog.link_to_version(&version, &page));
        }
        Command::Context { page } => {
            let context = catalog.page(&page).to_template_context();
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
    }

    Ok(())
}
