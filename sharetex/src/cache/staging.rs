//! Staging directories for atomic asset promotion.
//!
//! An asset's files are written into a private directory under
//! `{root}/.staging/` and the whole directory is renamed into its final
//! location once every file is in place. Dropping a [`StagedAsset`] without
//! committing it deletes the staging directory, so cancelled or failed
//! downloads never leave a partial asset folder behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use super::disk::{ensure_dir, write_file_atomic};
use super::error::CacheError;
use super::key::AssetKey;

/// Name of the staging area under the cache root.
pub const STAGING_DIR_NAME: &str = ".staging";

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An asset directory under construction.
#[derive(Debug)]
pub struct StagedAsset {
    key: AssetKey,
    staging_dir: PathBuf,
    final_dir: PathBuf,
    committed: bool,
}

impl StagedAsset {
    pub(crate) fn create(root: &Path, key: &AssetKey) -> Result<Self, CacheError> {
        let unique = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = format!(
            "{}-{}-{}-{}",
            key.relative_path().to_string_lossy().replace(['/', '\\'], "_"),
            std::process::id(),
            unique,
            chrono::Utc::now().timestamp_millis()
        );
        let staging_dir = root.join(STAGING_DIR_NAME).join(name);
        ensure_dir(&staging_dir)?;
        debug!(key = %key, dir = %staging_dir.display(), "Staging directory created");

        Ok(Self {
            key: key.clone(),
            staging_dir,
            final_dir: root.join(key.relative_path()),
            committed: false,
        })
    }

    pub fn key(&self) -> &AssetKey {
        &self.key
    }

    /// Directory currently receiving files.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Directory the files will live in after [`commit`](Self::commit).
    pub fn final_dir(&self) -> &Path {
        &self.final_dir
    }

    /// Write one file into the staging directory.
    ///
    /// `file_name` must be a bare file name.
    pub fn write_file(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, CacheError> {
        let bare = Path::new(file_name)
            .file_name()
            .is_some_and(|name| name == std::ffi::OsStr::new(file_name));
        if !bare {
            return Err(CacheError::InvalidFileName(file_name.to_string()));
        }
        let path = self.staging_dir.join(file_name);
        write_file_atomic(&path, bytes)?;
        Ok(path)
    }

    /// Move the staged files into place and return the final directory.
    ///
    /// If the final directory already exists (another process finished the
    /// same asset first) the staged copy is discarded and the existing one
    /// is kept.
    pub fn commit(mut self) -> Result<PathBuf, CacheError> {
        if let Some(parent) = self.final_dir.parent() {
            ensure_dir(parent)?;
        }

        if self.final_dir.exists() {
            warn!(key = %self.key, "Asset already present, discarding staged copy");
            return Ok(self.final_dir.clone());
        }

        match fs::rename(&self.staging_dir, &self.final_dir) {
            Ok(()) => {
                self.committed = true;
                info!(key = %self.key, dir = %self.final_dir.display(), "Asset promoted to cache");
                Ok(self.final_dir.clone())
            }
            Err(_) if self.final_dir.exists() => {
                warn!(key = %self.key, "Asset appeared during promotion, discarding staged copy");
                Ok(self.final_dir.clone())
            }
            Err(source) => Err(CacheError::Promote {
                from: self.staging_dir.clone(),
                to: self.final_dir.clone(),
                source,
            }),
        }
    }
}

impl Drop for StagedAsset {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.staging_dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(dir = %self.staging_dir.display(), error = %e, "Failed to remove staging directory");
            }
        } else {
            debug!(key = %self.key, "Staging directory discarded");
        }
    }
}
