//! Texture resolution tiers.
//!
//! Every asset in the catalog is published at one or more of three pixel
//! densities. The same three labels show up in archive entry names, in
//! download link titles (after normalization) and in the cache layout.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Resolution tier of a texture set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resolution {
    /// 1024 px
    #[default]
    OneK,
    /// 2048 px
    TwoK,
    /// 4096 px
    FourK,
}

/// Error returned when a string is not a resolution label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resolution '{0}' (expected 1K, 2K or 4K)")]
pub struct UnknownResolution(pub String);

impl Resolution {
    /// All tiers, lowest first.
    pub const ALL: [Resolution; 3] = [Resolution::OneK, Resolution::TwoK, Resolution::FourK];

    /// Canonical upper-case label (`1K`, `2K`, `4K`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::OneK => "1K",
            Resolution::TwoK => "2K",
            Resolution::FourK => "4K",
        }
    }

    /// Match a single name token against the tier labels, ignoring case.
    ///
    /// Only the bare label matches: `1k` and `1K` do, `1K Textures` does not.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|res| res.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = UnknownResolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s.trim()).ok_or_else(|| UnknownResolution(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_ignores_case() {
        assert_eq!(Resolution::from_token("1k"), Some(Resolution::OneK));
        assert_eq!(Resolution::from_token("2K"), Some(Resolution::TwoK));
        assert_eq!(Resolution::from_token("4k"), Some(Resolution::FourK));
    }

    #[test]
    fn test_from_token_rejects_other_labels() {
        assert_eq!(Resolution::from_token("8K"), None);
        assert_eq!(Resolution::from_token("1K Textures"), None);
        assert_eq!(Resolution::from_token(""), None);
    }

    #[test]
    fn test_display_and_parse() {
        for res in Resolution::ALL {
            assert_eq!(res.to_string().parse::<Resolution>(), Ok(res));
        }
        assert!("16k".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_ordering_lowest_first() {
        assert!(Resolution::OneK < Resolution::TwoK);
        assert!(Resolution::TwoK < Resolution::FourK);
    }
}
