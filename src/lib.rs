//! Version catalog for multi-version documentation builds
//!
//! Resolves the metadata of every documented ref into a catalog that can be
//! listed in navigation menus and queried for cross-version links.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod version;
