//! Converter configuration.
//!
//! Example config.toml:
//! ```toml
//! [converter]
//! enum_to_model = true
//!
//! [models]
//! camel_case_names = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Type conversion settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Register enumerations as named models. When off, enumerations are
    /// converted like the string-like types they derive from.
    pub enum_to_model: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            enum_to_model: true,
        }
    }
}

/// Model registry settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Name models in UpperCamelCase (`admin-status` -> `AdminStatus`).
    /// When off, the YANG local name is used as is.
    pub camel_case_names: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            camel_case_names: true,
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub converter: ConverterConfig,
    pub models: ModelConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
