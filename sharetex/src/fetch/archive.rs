//! Archive reading.

use std::io::{Cursor, Read};

use super::error::FetchError;

/// One file extracted from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/` separated.
    pub path: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// File name split into stem and extension (with its dot).
    ///
    /// Returns `None` for names without an extension.
    pub fn stem_and_extension(&self) -> Option<(&str, &str)> {
        let name = self.file_name();
        let dot = name.rfind('.')?;
        if dot == 0 || dot + 1 == name.len() {
            return None;
        }
        Some((&name[..dot], &name[dot..]))
    }
}

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

/// Buffer to reserve for an entry. Declared sizes come from the network.
fn prealloc_len(declared: u64) -> usize {
    declared.min(MAX_PREALLOC) as usize
}

/// Turns downloaded archive bytes into file entries.
pub trait ArchiveReader: Send + Sync {
    /// Every file in the archive, directories excluded, in archive order.
    fn entries(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, FetchError>;
}

/// Reads `.zip` archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveReader;

impl ArchiveReader for ZipArchiveReader {
    fn entries(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, FetchError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| FetchError::Archive(e.to_string()))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| FetchError::Archive(e.to_string()))?;
            if file.is_dir() {
                continue;
            }
            let path = file.name().replace('\\', "/");
            let mut bytes = Vec::with_capacity(prealloc_len(file.size()));
            file.read_to_end(&mut bytes)
                .map_err(|e| FetchError::Archive(format!("{}: {}", path, e)))?;
            entries.push(ArchiveEntry { path, bytes });
        }
        Ok(entries)
    }
}
