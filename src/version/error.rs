use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate version name: {0}")]
    DuplicateVersion(String),

    #[error("Metadata key '{key}' does not match version name '{name}'")]
    NameMismatch { key: String, name: String },

    #[error("Failed to read metadata from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid metadata: {0}")]
    Parse(#[from] serde_json::Error),
}
