//! Fetch error types.

use thiserror::Error;

use crate::cache::CacheError;
use crate::catalog::PayloadError;
use crate::resolution::Resolution;

/// Errors from network fetches and asset imports.
///
/// `Clone` so that one outcome can be handed to every caller waiting on a
/// coalesced fetch; underlying errors are kept as their messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("HTTP request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The item offers no download at the requested resolution.
    #[error("'{slug}' has no {resolution} download")]
    MissingLink { slug: String, resolution: Resolution },

    /// The item has no preview image.
    #[error("'{0}' has no preview image")]
    MissingPreview(String),

    /// The downloaded archive could not be read.
    #[error("Failed to read archive: {0}")]
    Archive(String),

    /// The archive held no texture whose name could be parsed.
    #[error("Archive for '{0}' contained no importable textures")]
    NothingImported(String),

    /// Writing to the cache failed.
    #[error("Failed to write cache: {0}")]
    Write(String),

    /// The catalog payload was unusable.
    #[error("Catalog payload error: {0}")]
    Payload(String),

    /// The fetch was cancelled before it completed.
    #[error("Fetch cancelled")]
    Cancelled,
}

impl From<CacheError> for FetchError {
    fn from(e: CacheError) -> Self {
        FetchError::Write(e.to_string())
    }
}

impl From<PayloadError> for FetchError {
    fn from(e: PayloadError) -> Self {
        FetchError::Payload(e.to_string())
    }
}
