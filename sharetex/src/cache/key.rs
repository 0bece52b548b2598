//! Cache keys.

use std::fmt;
use std::path::PathBuf;

use crate::resolution::Resolution;

/// Root of the host import paths.
pub const IMPORT_ROOT: &str = "/Game/ShareTextures";

/// Identity of one downloaded texture set.
///
/// Two downloads share a directory only if category, resolution and slug are
/// all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub category: String,
    pub resolution: Resolution,
    pub slug: String,
}

impl AssetKey {
    pub fn new(category: impl Into<String>, resolution: Resolution, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            resolution,
            slug: slug.into(),
        }
    }

    /// Path of the asset directory relative to the cache root.
    pub fn relative_path(&self) -> PathBuf {
        [
            path_component(&self.category),
            self.resolution.to_string(),
            path_component(&self.slug),
        ]
        .iter()
        .collect()
    }

    /// Destination folder in the host project, e.g.
    /// `/Game/ShareTextures/Rock/1K`.
    pub fn import_path(&self) -> String {
        format!("{}/{}/{}", IMPORT_ROOT, self.category, self.resolution)
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.resolution, self.slug)
    }
}

/// Make a server-provided name safe to use as a single path component.
pub(crate) fn path_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    match cleaned.trim() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}
