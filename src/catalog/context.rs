//! Per-page render context
//!
//! Templates render a version menu on every page. [`PageContext`] binds the
//! build-wide catalog to the page currently being rendered and exposes the
//! versions as [`VersionEntry`] values carrying a ready-to-use link.

use serde::Serialize;

use crate::catalog::{VersionCatalog, Versions};
use crate::version::types::VersionMetadata;

/// Version as seen by templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    pub name: String,
    /// Link from the current page to the same page in this version
    pub url: String,
    pub version: String,
    pub release: String,
    pub is_released: bool,
}

/// Everything a template needs to render the version menu of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    pub current_version: Option<VersionEntry>,
    pub latest_version: Option<VersionEntry>,
    pub tags: Vec<VersionEntry>,
    pub branches: Vec<VersionEntry>,
    pub releases: Vec<VersionEntry>,
    pub in_development: Vec<VersionEntry>,
}

/// Catalog queries relative to one page of the current version
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    catalog: &'a VersionCatalog,
    current_page: &'a str,
}

impl<'a> PageContext<'a> {
    pub fn new(catalog: &'a VersionCatalog, current_page: &'a str) -> Self {
        Self {
            catalog,
            current_page,
        }
    }

    pub fn current_page(&self) -> &'a str {
        self.current_page
    }

    /// Check whether `version_name` has the current page
    pub fn has_page(&self, version_name: &str) -> bool {
        self.catalog
            .version_has_current_page(version_name, self.current_page)
    }

    /// Link to the current page (or the root page) in `version_name`
    pub fn link_to_version(&self, version_name: &str) -> String {
        self.catalog.link_to_version(version_name, self.current_page)
    }

    pub fn entry(&self, version: &VersionMetadata) -> VersionEntry {
        VersionEntry {
            name: version.name.clone(),
            url: self.link_to_version(&version.name),
            version: version.version.clone(),
            release: version.release.clone(),
            is_released: version.is_released,
        }
    }

    pub fn current(&self) -> Option<VersionEntry> {
        self.catalog.current().map(|v| self.entry(v))
    }

    pub fn latest(&self) -> Option<VersionEntry> {
        self.catalog.latest().map(|v| self.entry(v))
    }

    pub fn tags(&self) -> Vec<VersionEntry> {
        self.entries(self.catalog.tags())
    }

    pub fn branches(&self) -> Vec<VersionEntry> {
        self.entries(self.catalog.branches())
    }

    pub fn releases(&self) -> Vec<VersionEntry> {
        self.entries(self.catalog.releases())
    }

    pub fn in_development(&self) -> Vec<VersionEntry> {
        self.entries(self.catalog.in_development())
    }

    fn entries(&self, versions: Versions<'_>) -> Vec<VersionEntry> {
        versions.map(|v| self.entry(v)).collect()
    }

    pub fn to_template_context(&self) -> TemplateContext {
        TemplateContext {
            current_version: self.current(),
            latest_version: self.latest(),
            tags: self.tags(),
            branches: self.branches(),
            releases: self.releases(),
            in_development: self.in_development(),
        }
    }
}
