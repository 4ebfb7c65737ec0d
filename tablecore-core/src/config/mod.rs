//! Configuration management for TableCore
//!
//! This module provides environment- and file-based configuration with
//! support for defaults and validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

mod error;

pub use error::ConfigError;

use crate::logging::{LogConfig, LogLevel};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Rows pre-allocated for each new table
    pub initial_row_capacity: usize,

    /// Maximum length of table and column names, in characters (unbounded if unset)
    pub max_name_length: Option<usize>,

    /// Maximum number of tables (unbounded if unset)
    pub max_tables: Option<usize>,

    /// Emit a trace event for every cell read and write
    pub trace_cell_access: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include timestamps
    pub with_timestamp: bool,

    /// Include target module
    pub with_target: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_row_capacity: 64,
            max_name_length: None,
            max_tables: None,
            trace_cell_access: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamp: true,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Convert into the logging subsystem's configuration
    pub fn to_log_config(&self) -> Result<LogConfig, ConfigError> {
        let level = self
            .level
            .parse::<LogLevel>()
            .map_err(|e| ConfigError::InvalidValue {
                setting: "logging.level",
                reason: e.to_string(),
            })?;

        Ok(LogConfig::new(level)
            .with_timestamp(self.with_timestamp)
            .with_target(self.with_target)
            .json_format(self.json_format))
    }
}

fn parse_var<T>(setting: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        setting,
        reason: e.to_string(),
    })
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: TABLECORE_<SECTION>_<KEY>
    /// Example: TABLECORE_STORE_MAX_TABLES=128
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Store config
        if let Some(raw) = lookup("TABLECORE_STORE_INITIAL_ROW_CAPACITY") {
            config.store.initial_row_capacity = parse_var("store.initial_row_capacity", raw)?;
        }
        if let Some(raw) = lookup("TABLECORE_STORE_MAX_NAME_LENGTH") {
            config.store.max_name_length = Some(parse_var("store.max_name_length", raw)?);
        }
        if let Some(raw) = lookup("TABLECORE_STORE_MAX_TABLES") {
            config.store.max_tables = Some(parse_var("store.max_tables", raw)?);
        }
        if let Some(raw) = lookup("TABLECORE_STORE_TRACE_CELL_ACCESS") {
            config.store.trace_cell_access = parse_var("store.trace_cell_access", raw)?;
        }

        // Logging config
        if let Some(level) = lookup("TABLECORE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(raw) = lookup("TABLECORE_LOG_JSON") {
            config.logging.json_format = parse_var("logging.json_format", raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate store config
        if self.store.max_name_length == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "max_name_length must be greater than 0 when set".to_string(),
            ));
        }

        if self.store.max_tables == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "max_tables must be greater than 0 when set".to_string(),
            ));
        }

        // Validate logging config
        if self.logging.level.parse::<LogLevel>().is_err() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)?;

        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Default location of the configuration file, relative to the working directory
    pub fn default_path() -> PathBuf {
        PathBuf::from("tablecore.toml")
    }
}
