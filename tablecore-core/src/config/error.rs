//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, validating or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write configuration file {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// TOML syntax error, or a key with the wrong type
    #[error("Failed to parse configuration file {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    /// A single setting could not be parsed
    #[error("Invalid value for {setting}: {reason}")]
    InvalidValue { setting: &'static str, reason: String },

    /// Settings parsed but are out of range
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}
