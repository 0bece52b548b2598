//! Network fetches and asset import.
//!
//! The [`FetchOrchestrator`] ties the HTTP client, the archive reader, the
//! name parser and the cache store together. Both the client and the reader
//! sit behind traits so tests can run the whole pipeline offline.

mod archive;
mod error;
mod http;
mod import;
mod orchestrator;

pub use archive::{ArchiveEntry, ArchiveReader, ZipArchiveReader};
pub use error::FetchError;
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use import::{import_entries, ImportReport, ImportedTexture, SkippedEntry};
pub use orchestrator::{AssetFetch, DownloadedAsset, FetchOrchestrator};
