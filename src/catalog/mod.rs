//! Version catalog for multi-version documentation builds
//!
//! A [`VersionCatalog`] is built once per build from the metadata of every
//! resolved ref, plus the name of the version currently being rendered. It
//! never changes afterwards: every view is recomputed from the stored
//! snapshot on each call, so one instance can be shared across threads and
//! across every page rendered in the build.
//!
//! # Modules
//!
//! - [`link`]: Relative URL paths between versions
//! - [`context`]: Per-page render context and template-facing entries

pub mod context;
pub mod link;

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::config::CatalogConfig;
use crate::version::error::CatalogError;
use crate::version::normalize::normalize_version;
use crate::version::types::{RefSource, VersionMetadata};

pub use context::{PageContext, TemplateContext, VersionEntry};

/// Sorted sequence of versions returned by the catalog views
pub type Versions<'a> = std::vec::IntoIter<&'a VersionMetadata>;

/// Immutable mapping of version name to metadata
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    metadata: IndexMap<String, VersionMetadata>,
    current_version_name: String,
    config: CatalogConfig,
}

impl VersionCatalog {
    /// Create a catalog from a name -> metadata mapping.
    ///
    /// Records are stored under their own `name`: a key that differs from it
    /// is ignored, and a repeated name keeps the last record. Both cases are
    /// logged. The current version does not need to be present (first build
    /// of a new branch).
    pub fn new(
        metadata: impl IntoIterator<Item = (String, VersionMetadata)>,
        current_version_name: impl Into<String>,
    ) -> Self {
        let mut by_name: IndexMap<String, VersionMetadata> = IndexMap::new();
        for (key, record) in metadata {
            if key != record.name {
                warn!(
                    "Metadata key '{}' does not match version name '{}', using the name",
                    key, record.name
                );
            }
            if by_name.insert(record.name.clone(), record).is_some() {
                warn!("Duplicate version name in metadata, keeping the last record");
            }
        }
        let current_version_name = current_version_name.into();

        if !by_name.contains_key(&current_version_name) {
            warn!(
                "Current version '{}' is not in the catalog",
                current_version_name
            );
        }
        debug!(
            "Created catalog with {} versions (current: {})",
            by_name.len(),
            current_version_name
        );

        Self {
            metadata: by_name,
            current_version_name,
            config: CatalogConfig::default(),
        }
    }

    /// Create a catalog from a list of records, keyed by their name.
    ///
    /// Fails if two records share a name.
    pub fn from_records(
        records: impl IntoIterator<Item = VersionMetadata>,
        current_version_name: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let mut metadata = IndexMap::new();
        for record in records {
            if metadata.contains_key(&record.name) {
                return Err(CatalogError::DuplicateVersion(record.name));
            }
            metadata.insert(record.name.clone(), record);
        }
        Ok(Self::new(metadata, current_version_name))
    }

    /// Load a catalog from the JSON metadata written by the ref resolver.
    ///
    /// The document is an object mapping each version name to its record.
    pub fn from_json_str(
        json: &str,
        current_version_name: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let metadata: IndexMap<String, VersionMetadata> = serde_json::from_str(json)?;
        if let Some((key, record)) = metadata.iter().find(|(key, record)| **key != record.name) {
            return Err(CatalogError::NameMismatch {
                key: key.clone(),
                name: record.name.clone(),
            });
        }
        Ok(Self::new(metadata, current_version_name))
    }

    /// Load a catalog from a JSON metadata file.
    pub fn from_path(
        path: &Path,
        current_version_name: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, current_version_name)
    }

    /// Replace the catalog configuration
    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn current_version_name(&self) -> &str {
        &self.current_version_name
    }

    /// Metadata of the version being rendered, if it is registered
    pub fn current(&self) -> Option<&VersionMetadata> {
        self.get(&self.current_version_name)
    }

    /// Metadata of the configured latest version, if any
    pub fn latest(&self) -> Option<&VersionMetadata> {
        self.config
            .latest_version
            .as_deref()
            .and_then(|name| self.get(name))
    }

    pub fn get(&self, name: &str) -> Option<&VersionMetadata> {
        self.metadata.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metadata.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// All versions, sorted by version key
    pub fn versions(&self) -> Versions<'_> {
        self.sorted_where(|_| true)
    }

    /// Versions built from tags
    pub fn tags(&self) -> Versions<'_> {
        self.sorted_where(|v| v.source == RefSource::Tags)
    }

    /// Versions built from branches
    pub fn branches(&self) -> Versions<'_> {
        self.sorted_where(|v| v.source == RefSource::Heads)
    }

    /// Released versions
    pub fn releases(&self) -> Versions<'_> {
        self.sorted_where(|v| v.is_released)
    }

    /// Versions still in development
    pub fn in_development(&self) -> Versions<'_> {
        self.sorted_where(|v| !v.is_released)
    }

    fn sorted_where<F>(&self, predicate: F) -> Versions<'_>
    where
        F: Fn(&VersionMetadata) -> bool,
    {
        let mut versions: Vec<&VersionMetadata> =
            self.metadata.values().filter(|v| predicate(v)).collect();
        versions.sort_by_cached_key(|v| (normalize_version(&v.name), v.name.clone()));
        versions.into_iter()
    }

    /// Check whether `version_name` has a page named `docname`.
    ///
    /// Unknown versions have no pages.
    pub fn has_page(&self, version_name: &str, docname: &str) -> bool {
        self.get(version_name)
            .is_some_and(|version| version.has_docname(docname))
    }

    /// Check whether `version_name` has the page currently being rendered.
    ///
    /// Always true for the current version itself.
    pub fn version_has_current_page(&self, version_name: &str, current_page: &str) -> bool {
        version_name == self.current_version_name || self.has_page(version_name, current_page)
    }

    /// Relative link from `current_page` of the current version to the same
    /// page in `version_name`, or to that version's root page if it lacks it.
    pub fn link_to_version(&self, version_name: &str, current_page: &str) -> String {
        let suffix = &self.config.page_suffix;

        if version_name == self.current_version_name {
            return format!("{}{}", link::page_basename(current_page), suffix);
        }

        let target = if self.has_page(version_name, current_page) {
            current_page
        } else {
            trace!(
                "Version '{}' has no page '{}', linking to '{}'",
                version_name, current_page, self.config.root_page
            );
            self.config.root_page.as_str()
        };

        let (from_root, to_root) = match (self.current(), self.get(version_name)) {
            (Some(current), Some(other)) => {
                link::output_roots(&current.outputdir, &other.outputdir)
            }
            _ => (self.current_version_name.clone(), version_name.to_string()),
        };

        link::relative_link(&from_root, current_page, &to_root, target, suffix)
    }

    /// Render context bound to one page of the current version
    pub fn page<'a>(&'a self, current_page: &'a str) -> PageContext<'a> {
        PageContext::new(self, current_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rstest::{fixture, rstest};

    fn record(name: &str, source: RefSource, is_released: bool, docnames: &[&str]) -> VersionMetadata {
        VersionMetadata {
            name: name.to_string(),
            version: String::new(),
            release: "0.2".to_string(),
            is_released,
            source,
            creatordate: DateTime::parse_from_rfc3339("2020-08-07T07:45:20-07:00").unwrap(),
            basedir: format!("/tmp/{name}").into(),
            sourcedir: format!("/tmp/{name}/docs").into(),
            outputdir: format!("/tmp/build/html/{name}").into(),
            confdir: format!("/tmp/{name}/docs").into(),
            docnames: docnames.iter().map(|d| d.to_string()).collect(),
            commit: "1233456".to_string(),
        }
    }

    #[fixture]
    fn catalog() -> VersionCatalog {
        VersionCatalog::from_records(
            vec![
                record("master", RefSource::Heads, false, &["testpage", "appendix/faq"]),
                record("v0.1.0", RefSource::Tags, true, &["old_testpage", "appendix/faq"]),
                record("branch-with/slash", RefSource::Heads, false, &["testpage"]),
            ],
            "master",
        )
        .unwrap()
    }

    fn names(versions: Versions<'_>) -> Vec<&str> {
        versions.map(|v| v.name.as_str()).collect()
    }

    #[rstest]
    fn views_filter_by_category(catalog: VersionCatalog) {
        assert_eq!(names(catalog.tags()), vec!["v0.1.0"]);
        assert_eq!(names(catalog.branches()), vec!["branch-with/slash", "master"]);
        assert_eq!(names(catalog.releases()), vec!["v0.1.0"]);
        assert_eq!(
            names(catalog.in_development()),
            vec!["branch-with/slash", "master"]
        );
        assert_eq!(
            names(catalog.versions()),
            vec!["branch-with/slash", "master", "v0.1.0"]
        );
    }

    #[rstest]
    fn views_are_restartable(catalog: VersionCatalog) {
        let first = names(catalog.branches());
        let second = names(catalog.branches());
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("master", "testpage", true)]
    #[case("v0.1.0", "testpage", false)]
    #[case("v0.1.0", "appendix/faq", true)]
    #[case("branch-with/slash", "appendix/faq", false)]
    #[case("unknown", "testpage", false)]
    fn has_page_checks_docnames(
        catalog: VersionCatalog,
        #[case] version: &str,
        #[case] docname: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(catalog.has_page(version, docname), expected);
    }

    #[rstest]
    #[case("testpage", "master", "testpage.html")]
    #[case("testpage", "v0.1.0", "../v0.1.0/index.html")]
    #[case("testpage", "branch-with/slash", "../branch-with/slash/testpage.html")]
    #[case("appendix/faq", "master", "faq.html")]
    #[case("appendix/faq", "v0.1.0", "../../v0.1.0/appendix/faq.html")]
    #[case("appendix/faq", "branch-with/slash", "../../branch-with/slash/index.html")]
    #[case("testpage", "unknown", "../unknown/index.html")]
    fn link_to_version_resolves_relative_path(
        catalog: VersionCatalog,
        #[case] page: &str,
        #[case] version: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(catalog.link_to_version(version, page), expected);
    }

    #[test]
    fn current_version_counts_as_having_every_page() {
        let catalog = VersionCatalog::from_records(
            vec![record("master", RefSource::Heads, false, &["testpage"])],
            "master",
        )
        .unwrap();

        assert!(!catalog.has_page("master", "genindex"));
        assert!(catalog.version_has_current_page("master", "genindex"));
        assert!(!catalog.version_has_current_page("v1.0", "genindex"));
    }

    #[test]
    fn unknown_current_version_is_tolerated() {
        let catalog = VersionCatalog::from_records(
            vec![record("v1.0", RefSource::Tags, true, &["testpage"])],
            "new-branch",
        )
        .unwrap();

        assert!(catalog.current().is_none());
        assert_eq!(catalog.link_to_version("new-branch", "testpage"), "testpage.html");
        assert_eq!(
            catalog.link_to_version("v1.0", "testpage"),
            "../v1.0/testpage.html"
        );
    }

    #[test]
    fn from_records_rejects_duplicate_names() {
        let result = VersionCatalog::from_records(
            vec![
                record("master", RefSource::Heads, false, &[]),
                record("master", RefSource::Tags, true, &[]),
            ],
            "master",
        );

        assert!(matches!(result, Err(CatalogError::DuplicateVersion(name)) if name == "master"));
    }

    #[test]
    fn new_stores_records_under_their_own_name() {
        let catalog = VersionCatalog::new(
            vec![
                (
                    "master".to_string(),
                    record("other", RefSource::Heads, false, &["testpage"]),
                ),
                (
                    "v1.0".to_string(),
                    record("v1.0", RefSource::Tags, true, &["testpage"]),
                ),
                (
                    "v1.0".to_string(),
                    record("v1.0", RefSource::Tags, true, &["index"]),
                ),
            ],
            "other",
        );

        assert!(!catalog.contains("master"));
        assert!(catalog.has_page("other", "testpage"));
        assert_eq!(names(catalog.versions()), vec!["other", "v1.0"]);
        assert!(catalog.has_page("v1.0", "index"));
        assert!(!catalog.has_page("v1.0", "testpage"));
    }

    #[rstest]
    #[case("testpage", "v0.1.0", "../0.1.0/index.html")]
    #[case("appendix/faq", "v0.1.0", "../../0.1.0/appendix/faq.html")]
    #[case("testpage", "feature/docs", "../feature-docs/testpage.html")]
    #[case("testpage", "master", "testpage.html")]
    #[case("testpage", "unknown", "../unknown/index.html")]
    fn link_to_version_follows_output_directories(
        #[case] page: &str,
        #[case] version: &str,
        #[case] expected: &str,
    ) {
        let with_outputdir = |mut version: VersionMetadata, outputdir: &str| {
            version.outputdir = outputdir.into();
            version
        };
        let catalog = VersionCatalog::from_records(
            vec![
                with_outputdir(
                    record("master", RefSource::Heads, false, &["testpage", "appendix/faq"]),
                    "/build/html/latest",
                ),
                with_outputdir(
                    record("v0.1.0", RefSource::Tags, true, &["appendix/faq"]),
                    "/build/html/0.1.0",
                ),
                with_outputdir(
                    record("feature/docs", RefSource::Heads, false, &["testpage"]),
                    "/build/html/feature-docs",
                ),
            ],
            "master",
        )
        .unwrap();

        assert_eq!(catalog.link_to_version(version, page), expected);
    }

    #[test]
    fn empty_catalog_yields_empty_views() {
        let catalog = VersionCatalog::new(IndexMap::new(), "master");

        assert!(catalog.is_empty());
        assert_eq!(catalog.tags().count(), 0);
        assert_eq!(catalog.in_development().count(), 0);
        assert!(catalog.latest().is_none());
    }

    #[rstest]
    fn latest_follows_config(catalog: VersionCatalog) {
        let catalog = catalog.with_config(CatalogConfig {
            latest_version: Some("v0.1.0".to_string()),
            ..CatalogConfig::default()
        });

        assert_eq!(catalog.latest().map(|v| v.name.as_str()), Some("v0.1.0"));
    }

    #[rstest]
    fn config_changes_suffix_and_root_page(catalog: VersionCatalog) {
        let catalog = catalog.with_config(CatalogConfig {
            latest_version: None,
            page_suffix: ".xhtml".to_string(),
            root_page: "contents".to_string(),
        });

        assert_eq!(
            catalog.link_to_version("v0.1.0", "testpage"),
            "../v0.1.0/contents.xhtml"
        );
        assert_eq!(catalog.link_to_version("master", "testpage"), "testpage.xhtml");
    }
}
