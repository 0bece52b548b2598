//! Renaming archive entries into a staged asset folder.

use tracing::{debug, error, warn};

use super::archive::ArchiveEntry;
use super::error::FetchError;
use crate::cache::StagedAsset;
use crate::naming::{parse_texture_name, NameParseError, RenameRules};

/// A texture written under its renamed file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTexture {
    /// Entry path inside the archive.
    pub source: String,
    /// File name in the asset folder, e.g. `T_Amethyst1-1K_N.png`.
    pub file_name: String,
    /// Material parameter the texture feeds, when its map type is labeled.
    pub parameter: Option<String>,
}

/// An entry that was left out because its name could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub source: String,
    pub error: NameParseError,
}

/// What happened to each entry of one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub written: Vec<ImportedTexture>,
    pub skipped: Vec<SkippedEntry>,
    /// Written files whose map type has no suffix in the rename table.
    pub unlabeled: Vec<String>,
    /// Entries without a file extension.
    pub ignored: Vec<String>,
}

impl ImportReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Parse, rename and write every entry into `staged`.
///
/// Unparseable names are skipped and logged; the import carries on. Write
/// failures abort the whole import.
pub fn import_entries(
    entries: Vec<ArchiveEntry>,
    staged: &StagedAsset,
    rules: &RenameRules,
) -> Result<ImportReport, FetchError> {
    let mut report = ImportReport::default();

    for entry in entries {
        let Some((stem, extension)) = entry.stem_and_extension() else {
            debug!(entry = %entry.path, "Ignoring entry without extension");
            report.ignored.push(entry.path.clone());
            continue;
        };

        let parsed = match parse_texture_name(stem, rules) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(key = %staged.key(), entry = %entry.path, "Skipping texture: {}", e);
                report.skipped.push(SkippedEntry {
                    source: entry.path.clone(),
                    error: e,
                });
                continue;
            }
        };

        let file_name = parsed.texture_file_name(rules, extension);
        let labeled = rules
            .suffix_for(&parsed.map_type)
            .is_some_and(|suffix| !suffix.is_empty());
        if !labeled {
            warn!(entry = %entry.path, map_type = %parsed.map_type, "No suffix for map type");
            report.unlabeled.push(file_name.clone());
        }

        if report.written.iter().any(|t| t.file_name == file_name) {
            warn!(entry = %entry.path, file = %file_name, "Duplicate texture name, keeping the later entry");
            report.written.retain(|t| t.file_name != file_name);
        }

        staged.write_file(&file_name, &entry.bytes)?;
        debug!(entry = %entry.path, file = %file_name, "Texture staged");

        report.written.push(ImportedTexture {
            source: entry.path,
            parameter: rules.parameter_for_texture(&file_name).map(str::to_string),
            file_name,
        });
    }

    Ok(report)
}
