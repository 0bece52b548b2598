//! Disk tier helpers: usage totals, clearing and atomic file writes.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::error::CacheError;

/// Outcome of clearing a cache directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearResult {
    pub files_deleted: u64,
    pub bytes_freed: u64,
}

impl fmt::Display for ClearResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removed {} files, freed {} bytes",
            self.files_deleted, self.bytes_freed
        )
    }
}

/// Count files and bytes under `root`. A missing root counts as empty.
pub fn disk_usage(root: &Path) -> Result<(u64, u64), CacheError> {
    if !root.exists() {
        return Ok((0, 0));
    }
    let mut files = 0;
    let mut bytes = 0;
    walk_files(root, &mut |_, len| {
        files += 1;
        bytes += len;
    })?;
    Ok((files, bytes))
}

/// Delete `root` and everything under it, reporting what was removed.
pub fn clear_directory(root: &Path) -> Result<ClearResult, CacheError> {
    let (files_deleted, bytes_freed) = disk_usage(root)?;
    match fs::remove_dir_all(root) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(CacheError::Remove {
                path: root.to_path_buf(),
                source,
            })
        }
    }
    Ok(ClearResult {
        files_deleted,
        bytes_freed,
    })
}

fn walk_files(dir: &Path, visit: &mut dyn FnMut(&Path, u64)) -> Result<(), CacheError> {
    let read_err = |source| CacheError::Read {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let file_type = entry.file_type().map_err(read_err)?;
        let path = entry.path();
        if file_type.is_dir() {
            walk_files(&path, visit)?;
        } else {
            let len = entry.metadata().map(|m| m.len()).unwrap_or(0);
            visit(&path, len);
        }
    }
    Ok(())
}

/// Create `dir` and its parents.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), CacheError> {
    fs::create_dir_all(dir).map_err(|source| CacheError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `bytes` to `path` through a sibling temp file and a rename, so a
/// reader never sees a half-written file.
pub(crate) fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = temp_sibling(path);
    let write_err = |source| CacheError::Write {
        path: tmp.clone(),
        source,
    };

    let result = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .map_err(write_err)
        .and_then(|()| {
            fs::rename(&tmp, path).map_err(|source| CacheError::Promote {
                from: tmp.clone(),
                to: path.to_path_buf(),
                source,
            })
        });

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
