//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors loading, saving or editing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: ini::Error },

    /// The file could not be written.
    #[error("Failed to write config file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// A value does not fit its key.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// No such configuration key.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}
