//! Sort keys for version-like strings
//!
//! Ref names are split on `.` and compared component by component:
//! - numeric components compare by value ("1.2" < "1.20" < "2.1.3")
//! - numeric components sort before non-numeric ones ("2.9.4" < "2.9.x")
//! - a shorter key sorts before a longer one sharing its prefix ("2.9" < "2.9.0")
//! - remaining ties fall back to plain string comparison
//!
//! This is not a semver implementation. It only needs to give a stable,
//! total order over arbitrary (possibly malformed) ref names.

use std::cmp::Ordering;

/// One `.`-separated component of a version key
#[derive(Debug, Clone, PartialEq, Eq)]
enum Component {
    /// ASCII digits only. `value` has leading zeros stripped so arbitrarily
    /// long numbers compare without overflow.
    Numeric { value: String, raw: String },
    Text(String),
}

impl Component {
    fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            let trimmed = raw.trim_start_matches('0');
            Component::Numeric {
                value: trimmed.to_string(),
                raw: raw.to_string(),
            }
        } else {
            Component::Text(raw.to_string())
        }
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                Component::Numeric { value: a, raw: ra },
                Component::Numeric { value: b, raw: rb },
            ) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| ra.cmp(rb)),
            (Component::Numeric { .. }, Component::Text(_)) => Ordering::Less,
            (Component::Text(_), Component::Numeric { .. }) => Ordering::Greater,
            (Component::Text(a), Component::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Totally ordered sort key for a version-like string
///
/// Two keys are equal only if the strings they were built from are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionKey(Vec<Component>);

/// Build the sort key for a version-like string.
///
/// Never fails: empty strings, leading zeros and non-ASCII input all produce
/// a valid key.
///
/// Examples:
/// - "2.3.1" -> [2, 3, 1]
/// - "2.9.x" -> [2, 9, "x"]
/// - "master" -> ["master"]
pub fn normalize_version(version: &str) -> VersionKey {
    VersionKey(version.split('.').map(Component::parse).collect())
}

/// Compare two version-like strings by their sort keys
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    normalize_version(a).cmp(&normalize_version(b))
}

/// Sort version-like strings in place by their sort keys
pub fn sort_versions<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by_cached_key(|v| normalize_version(v.as_ref()));
}
