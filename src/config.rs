//! TOML configuration for the connector catalog.
//!
//! ```toml
//! [registry]
//! duplicate_policy = "reject"
//!
//! [connectors]
//! enabled = ["SMB", "BloodHound"]
//! ```
//!
//! Every section is optional; an absent file means defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::connector::adapters::memory::DuplicatePolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntacConfig {
    /// Registry behaviour.
    pub registry: RegistrySettings,
    /// Connector selection.
    pub connectors: ConnectorSettings,
}

/// Registry behaviour settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// What to do when two connectors share a name.
    pub duplicate_policy: DuplicatePolicy,
}

/// Connector selection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectorSettings {
    /// Built-in connectors to register; the default set when unset.
    pub enabled: Option<Vec<String>>,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("failed to parse config {origin}: {source}")]
    Parse {
        /// File path, or `<inline>` for string input.
        origin: String,
        /// Underlying parse error.
        source: toml::de::Error,
    },
}

impl SyntacConfig {
    /// Loads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            source: error,
        })?;
        parse(&contents, &path.display().to_string())
    }

    /// Loads configuration from `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicit file cannot be read or parsed.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is invalid.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        parse(contents, "<inline>")
    }
}

fn parse(contents: &str, origin: &str) -> Result<SyntacConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        origin: origin.to_owned(),
        source,
    })
}
