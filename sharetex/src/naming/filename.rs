//! Archive entry name parsing.
//!
//! Texture archives have been published under several naming conventions:
//!
//! - `1K-amethyst_1-ao` (resolution first, dash separated)
//! - `blackmarble_1_ao-1K` (resolution last)
//! - `1K_metalicus_selection_2_polishedmarble_specular` (underscores only)
//! - `fabric_202_Albedo-1K` (mixed case map type)
//!
//! The parser does not rely on token positions. It normalizes separators,
//! pulls out the first resolution token and the first known map type token,
//! and rebuilds the asset name from whatever is left.
//!
//! When a name carries two resolution-like or two map-type-like tokens, only
//! the first one is consumed and the second stays inside the asset name.

use std::fmt;

use super::RenameRules;
use crate::resolution::Resolution;

/// Identity recovered from an archive entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Resolution tier found in the name.
    pub resolution: Resolution,
    /// Remaining tokens, each capitalized, concatenated.
    pub asset_name: String,
    /// Map type token, lower-cased.
    pub map_type: String,
}

/// Error parsing an archive entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameParseError {
    /// No `1K`/`2K`/`4K` token.
    MissingResolution(String),
    /// No token matching a known map type.
    MissingMapType(String),
    /// Nothing left after removing resolution and map type.
    MissingAssetName(String),
}

impl NameParseError {
    /// The raw name that failed to parse.
    pub fn raw_name(&self) -> &str {
        match self {
            NameParseError::MissingResolution(name)
            | NameParseError::MissingMapType(name)
            | NameParseError::MissingAssetName(name) => name,
        }
    }
}

impl fmt::Display for NameParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameParseError::MissingResolution(s) => write!(f, "No resolution in name: {}", s),
            NameParseError::MissingMapType(s) => write!(f, "No known map type in name: {}", s),
            NameParseError::MissingAssetName(s) => write!(f, "No asset name in name: {}", s),
        }
    }
}

impl std::error::Error for NameParseError {}

impl ParsedName {
    /// Output file name for this texture.
    ///
    /// Format: `T_{AssetName}-{Resolution}{Suffix}{Extension}`, where the
    /// extension is passed with its leading dot (or empty) and the suffix is
    /// empty for map types the rename table does not know.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharetex::naming::{parse_texture_name, RenameRules};
    ///
    /// let rules = RenameRules::standard();
    /// let parsed = parse_texture_name("1K-amethyst_1-normal", rules).unwrap();
    /// assert_eq!(parsed.texture_file_name(rules, ".jpg"), "T_Amethyst1-1K_N.jpg");
    /// ```
    pub fn texture_file_name(&self, rules: &RenameRules, extension: &str) -> String {
        let suffix = rules.suffix_for(&self.map_type).unwrap_or("");
        format!(
            "T_{}-{}{}{}",
            self.asset_name, self.resolution, suffix, extension
        )
    }
}

/// Parse an archive entry name (without extension) into its identity.
///
/// # Arguments
///
/// * `raw` - Entry base name, e.g. `"blackmarble_1_ao-1K"`
/// * `rules` - Rename table supplying the known map types
///
/// # Examples
///
/// ```
/// use sharetex::naming::{parse_texture_name, RenameRules};
/// use sharetex::Resolution;
///
/// let parsed = parse_texture_name("blackmarble_1_ao-1K", RenameRules::standard()).unwrap();
/// assert_eq!(parsed.resolution, Resolution::OneK);
/// assert_eq!(parsed.asset_name, "Blackmarble1");
/// assert_eq!(parsed.map_type, "ao");
/// ```
pub fn parse_texture_name(raw: &str, rules: &RenameRules) -> Result<ParsedName, NameParseError> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '-' { '_' } else { c })
        .collect();

    let mut tokens: Vec<&str> = normalized.split('_').filter(|t| !t.is_empty()).collect();

    let resolution = take_first(&mut tokens, Resolution::from_token);

    let map_type = take_first(&mut tokens, |token| {
        rules
            .map_types()
            .any(|known| known.eq_ignore_ascii_case(token))
            .then(|| token.to_lowercase())
    });

    let asset_name: String = tokens.iter().map(|token| capitalize_first(token)).collect();

    let resolution = resolution.ok_or_else(|| NameParseError::MissingResolution(raw.to_string()))?;
    let map_type = map_type.ok_or_else(|| NameParseError::MissingMapType(raw.to_string()))?;
    if asset_name.is_empty() {
        return Err(NameParseError::MissingAssetName(raw.to_string()));
    }

    Ok(ParsedName {
        resolution,
        asset_name,
        map_type,
    })
}

/// Remove and return the first token `matcher` accepts.
fn take_first<T>(tokens: &mut Vec<&str>, matcher: impl Fn(&str) -> Option<T>) -> Option<T> {
    let (index, value) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, token)| matcher(token).map(|value| (i, value)))?;
    tokens.remove(index);
    Some(value)
}

/// Upper-case the first character, leave the rest untouched.
fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
