//! Configuration management

use crate::pipeline::{DEFAULT_TOOLCHAINS, ToolchainTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential the engine uses to clone repositories
    pub credential_id: String,
    /// Log level
    pub log_level: String,
    /// Toolchain key to install path table
    pub toolchains: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential_id: String::new(),
            log_level: "info".to_string(),
            toolchains: DEFAULT_TOOLCHAINS
                .iter()
                .map(|(key, path)| ((*key).to_string(), (*path).to_string()))
                .collect(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML or JSON file
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            _ => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };
        Ok(config)
    }

    /// Builds the toolchain table handed to the compiler
    #[must_use]
    pub fn toolchain_table(&self) -> ToolchainTable {
        ToolchainTable::new(self.toolchains.clone())
    }
}
