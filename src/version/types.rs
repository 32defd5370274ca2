//! Common types for version metadata

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Format of `creatordate` as written by `git for-each-ref --format=%(creatordate:iso)`
pub const CREATORDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Ref category a version was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefSource {
    /// Branch (refs/heads/*)
    Heads,
    /// Tag (refs/tags/*)
    Tags,
}

impl RefSource {
    /// Returns the string representation of the ref source
    pub fn as_str(&self) -> &'static str {
        match self {
            RefSource::Heads => "heads",
            RefSource::Tags => "tags",
        }
    }
}

impl std::str::FromStr for RefSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heads" => Ok(RefSource::Heads),
            "tags" => Ok(RefSource::Tags),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RefSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of one resolved ref, as produced by the upstream ref resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// Ref name (e.g., "master", "v0.1.0", "feature/docs")
    pub name: String,
    /// Short version label, may be empty
    #[serde(default)]
    pub version: String,
    /// Full release label
    #[serde(default)]
    pub release: String,
    /// Whether the ref is a tagged release
    pub is_released: bool,
    pub source: RefSource,
    /// Ref creation time, informational only
    #[serde(with = "creatordate")]
    pub creatordate: DateTime<FixedOffset>,
    pub basedir: PathBuf,
    pub sourcedir: PathBuf,
    pub outputdir: PathBuf,
    pub confdir: PathBuf,
    /// Every page (docname) present in this version
    #[serde(default)]
    pub docnames: BTreeSet<String>,
    /// Commit hash as lowercase hex
    #[serde(deserialize_with = "deserialize_commit")]
    pub commit: String,
}

impl VersionMetadata {
    /// Check whether this version contains the given docname
    pub fn has_docname(&self, docname: &str) -> bool {
        self.docnames.contains(docname)
    }
}

mod creatordate {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(CREATORDATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, CREATORDATE_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&raw))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommit {
    Hash(String),
    Number(u64),
}

fn deserialize_commit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawCommit::deserialize(deserializer)? {
        RawCommit::Hash(hash) => hash,
        RawCommit::Number(number) => format!("{number:x}"),
    })
}
