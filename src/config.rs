use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::error::CatalogError;

/// Default suffix appended to docnames when building links
pub const DEFAULT_PAGE_SUFFIX: &str = ".html";

/// Default docname linked to when a version lacks the current page
pub const DEFAULT_ROOT_PAGE: &str = "index";

/// Catalog configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Version advertised as the latest one in menus
    pub latest_version: Option<String>,
    /// Suffix of rendered pages (".html", ".xhtml", ...)
    pub page_suffix: String,
    /// Fallback docname for versions missing the current page
    pub root_page: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            latest_version: None,
            page_suffix: DEFAULT_PAGE_SUFFIX.to_string(),
            root_page: DEFAULT_ROOT_PAGE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Default log file, under the platform's local data directory
pub fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("multiversion-catalog")
        .join("mv-catalog.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<CatalogConfig>(json!({
            "latestVersion": "v2.0.0"
        }))
        .unwrap();

        assert_eq!(result.latest_version.as_deref(), Some("v2.0.0"));
        assert_eq!(result.page_suffix, ".html");
        assert_eq!(result.root_page, "index");
    }

    #[test]
    fn catalog_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<CatalogConfig>(json!({
            "latestVersion": "master",
            "pageSuffix": ".xhtml",
            "rootPage": "contents"
        }))
        .unwrap();

        assert_eq!(
            result,
            CatalogConfig {
                latest_version: Some("master".to_string()),
                page_suffix: ".xhtml".to_string(),
                root_page: "contents".to_string(),
            }
        );
    }

    #[test]
    fn catalog_config_from_path_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = CatalogConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn log_path_lives_in_catalog_data_directory() {
        let path = log_path();

        assert!(path.ends_with("multiversion-catalog/mv-catalog.log"));
    }
}
