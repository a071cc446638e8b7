//! Toolchain version lookup
//!
//! Maps the toolchain keys a specification may name to their install
//! location on the build nodes. The table is built once and shared read-only
//! by every compilation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Toolchains every node image ships with
pub const DEFAULT_TOOLCHAINS: &[(&str, &str)] = &[
    ("jdk1.6", "/usr/lib/jvm/java-1.6.0"),
    ("jdk1.7", "/usr/lib/jvm/java-1.7.0"),
    ("jdk1.8", "/usr/lib/jvm/java-1.8.0"),
];

/// Immutable toolchain key to install path table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolchainTable {
    paths: BTreeMap<String, String>,
}

impl ToolchainTable {
    /// Creates a table from key/path pairs
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            paths: entries
                .into_iter()
                .map(|(key, path)| (key.into(), path.into()))
                .collect(),
        }
    }

    /// Resolves a toolchain key to its install path
    #[must_use]
    pub fn resolve(&self, version: &str) -> Option<&str> {
        self.paths.get(version).map(String::as_str)
    }

    /// Returns true if the key is known
    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        self.paths.contains_key(version)
    }

    /// Iterates entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of known toolchains
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no toolchain is known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for ToolchainTable {
    fn default() -> Self {
        Self::new(DEFAULT_TOOLCHAINS.iter().copied())
    }
}
