//! Two-tier cache store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::disk::{clear_directory, disk_usage, write_file_atomic, ClearResult};
use super::error::CacheError;
use super::preview::{decode_image, ImageHandle};
use super::inflight::InFlight;
use super::key::{path_component, AssetKey};
use super::memory::{MemoryImageCache, MemoryStats};
use super::staging::StagedAsset;
use crate::fetch::{DownloadedAsset, FetchError};

/// Directory under the cache root holding preview images.
pub const THUMBNAILS_DIR: &str = "Thumbnails";

/// Shared result of an asset download.
pub type AssetOutcome = Result<DownloadedAsset, FetchError>;

/// Shared result of a thumbnail fetch: the decoded image, if decodable.
pub type ThumbnailOutcome = Result<Option<ImageHandle>, FetchError>;

/// Disk and memory totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub disk_files: u64,
    pub disk_bytes: u64,
    pub memory: MemoryStats,
}

/// Decoded previews in memory over asset folders and preview files on disk.
///
/// The disk tier is authoritative: an asset exists once its final directory
/// exists, and every memory entry can be rebuilt from its file on disk.
///
/// ```text
/// {root}/
/// ├── Thumbnails/{slug}
/// ├── {category}/{resolution}/{slug}/T_*.png
/// └── .staging/            (in-progress downloads)
/// ```
#[derive(Debug)]
pub struct CacheStore {
    root: PathBuf,
    memory: MemoryImageCache,
    assets: InFlight<AssetKey, AssetOutcome>,
    thumbnails: InFlight<String, ThumbnailOutcome>,
}

impl CacheStore {
    /// Create a store rooted at `root` with a memory budget in bytes.
    ///
    /// Nothing is created on disk until something is written.
    pub fn new(root: impl Into<PathBuf>, memory_size_bytes: u64) -> Self {
        Self {
            root: root.into(),
            memory: MemoryImageCache::new(memory_size_bytes),
            assets: InFlight::new(),
            thumbnails: InFlight::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory an asset lives in once downloaded. Need not exist.
    pub fn asset_directory(&self, key: &AssetKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Whether the asset's final directory exists.
    pub fn has_asset(&self, key: &AssetKey) -> bool {
        let present = self.asset_directory(key).is_dir();
        if present {
            debug!(key = %key, "Asset cache hit");
        }
        present
    }

    /// Start writing an asset. Files become visible on [`StagedAsset::commit`].
    pub fn begin_asset(&self, key: &AssetKey) -> Result<StagedAsset, CacheError> {
        StagedAsset::create(&self.root, key)
    }

    /// Path of the preview file for `slug`.
    pub fn thumbnail_path(&self, slug: &str) -> PathBuf {
        self.root.join(THUMBNAILS_DIR).join(path_component(slug))
    }

    pub fn has_thumbnail(&self, slug: &str) -> bool {
        self.thumbnail_path(slug).is_file()
    }

    /// Decoded preview for `slug`.
    ///
    /// Served from memory when possible, otherwise read from disk, decoded
    /// and remembered. A missing or undecodable file yields `None`.
    pub fn get_image(&self, slug: &str) -> Option<ImageHandle> {
        // Same key as the file on disk, so slugs sharing a file share an entry
        let memory_key = path_component(slug);
        if let Some(image) = self.memory.get(&memory_key) {
            debug!(slug, "Preview memory hit");
            return Some(image);
        }

        let path = self.thumbnail_path(slug);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cached preview");
                return None;
            }
        };

        match decode_image(&bytes) {
            Some(image) => {
                debug!(slug, "Preview disk hit");
                self.memory.insert(&memory_key, image.clone());
                Some(image)
            }
            None => {
                warn!(path = %path.display(), "Cached preview could not be decoded");
                None
            }
        }
    }

    /// Store raw preview bytes on disk. The memory tier is left alone.
    pub fn put_image_bytes(&self, slug: &str, bytes: &[u8]) -> Result<PathBuf, CacheError> {
        let path = self.thumbnail_path(slug);
        write_file_atomic(&path, bytes)?;
        debug!(slug, bytes = bytes.len(), "Preview written");
        Ok(path)
    }

    /// Drop every decoded preview. Disk is untouched.
    pub fn clear_memory(&self) {
        self.memory.clear();
    }

    /// Delete the whole cache root and the memory tier.
    pub fn clear_all(&self) -> Result<ClearResult, CacheError> {
        self.memory.clear();
        let result = clear_directory(&self.root)?;
        info!(root = %self.root.display(), "Cache cleared: {}", result);
        Ok(result)
    }

    /// Files and bytes currently on disk.
    pub fn disk_usage(&self) -> Result<(u64, u64), CacheError> {
        disk_usage(&self.root)
    }

    pub fn stats(&self) -> Result<CacheStats, CacheError> {
        let (disk_files, disk_bytes) = self.disk_usage()?;
        Ok(CacheStats {
            disk_files,
            disk_bytes,
            memory: self.memory.stats(),
        })
    }

    /// Registry of asset downloads in progress.
    pub fn asset_flights(&self) -> &InFlight<AssetKey, AssetOutcome> {
        &self.assets
    }

    /// Registry of preview downloads in progress.
    pub fn thumbnail_flights(&self) -> &InFlight<String, ThumbnailOutcome> {
        &self.thumbnails
    }
}
