//! Cache error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from cache disk operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Creating a cache directory failed.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// Writing a cache file failed.
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// Reading a cache file or directory failed.
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Removing a cache file or directory failed.
    #[error("Failed to remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },

    /// Renaming a staging directory into place failed.
    #[error("Failed to move {from} to {to}: {source}")]
    Promote {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// A file name that would escape its directory.
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),
}
