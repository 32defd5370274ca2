//! Version metadata layer for multi-version documentation builds
//!
//! This module provides the records handed over by the upstream ref resolver
//! and the sort key used to order them in navigation menus.
//!
//! # Modules
//!
//! - [`types`]: `VersionMetadata` and `RefSource`
//! - [`normalize`]: Version sort keys for heterogeneous ref names
//! - [`error`]: Error types for catalog construction and loading

pub mod error;
pub mod normalize;
pub mod types;
