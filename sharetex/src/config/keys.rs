//! Registry of user-editable configuration keys.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::ConfigError;
use super::file::ConfigFile;
use super::size::parse_size;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const URL_HINT: &str = "expected an http(s) URL";

/// A `section.key` in `config.ini`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    CacheDirectory,
    CacheMemorySize,
    CatalogItemsUrl,
    CatalogCategoriesUrl,
    CatalogImageHost,
    CatalogMinScore,
    DownloadTimeout,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// Every key, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::CacheDirectory,
            ConfigKey::CacheMemorySize,
            ConfigKey::CatalogItemsUrl,
            ConfigKey::CatalogCategoriesUrl,
            ConfigKey::CatalogImageHost,
            ConfigKey::CatalogMinScore,
            ConfigKey::DownloadTimeout,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingDirectory,
        ]
    }

    /// Full name, e.g. `cache.directory`.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::CacheDirectory => "cache.directory",
            ConfigKey::CacheMemorySize => "cache.memory_size",
            ConfigKey::CatalogItemsUrl => "catalog.items_url",
            ConfigKey::CatalogCategoriesUrl => "catalog.categories_url",
            ConfigKey::CatalogImageHost => "catalog.image_host",
            ConfigKey::CatalogMinScore => "catalog.min_score",
            ConfigKey::DownloadTimeout => "download.timeout",
            ConfigKey::LoggingLevel => "logging.level",
            ConfigKey::LoggingDirectory => "logging.directory",
        }
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(section, _)| section)
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(_, key)| key)
    }

    /// Current value as it would appear in the file.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::CacheDirectory => config.cache.directory.display().to_string(),
            ConfigKey::CacheMemorySize => config.memory_size_text(),
            ConfigKey::CatalogItemsUrl => config.catalog.items_url.clone(),
            ConfigKey::CatalogCategoriesUrl => config.catalog.categories_url.clone(),
            ConfigKey::CatalogImageHost => config.catalog.image_host.clone(),
            ConfigKey::CatalogMinScore => config.catalog.min_score.to_string(),
            ConfigKey::DownloadTimeout => config.download.timeout.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => config.logging.directory.display().to_string(),
        }
    }

    /// Validate `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: self.name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match self {
            ConfigKey::CacheDirectory => {
                config.cache.directory =
                    non_empty_path(value).ok_or_else(|| invalid("empty path"))?;
            }
            ConfigKey::CacheMemorySize => {
                config.cache.memory_size =
                    parse_size(value).ok_or_else(|| invalid("expected a size like 256MB"))?;
            }
            ConfigKey::CatalogItemsUrl => {
                config.catalog.items_url = http_url(value).ok_or_else(|| invalid(URL_HINT))?;
            }
            ConfigKey::CatalogCategoriesUrl => {
                config.catalog.categories_url = http_url(value).ok_or_else(|| invalid(URL_HINT))?;
            }
            ConfigKey::CatalogImageHost => {
                config.catalog.image_host = http_url(value).ok_or_else(|| invalid(URL_HINT))?;
            }
            ConfigKey::CatalogMinScore => {
                config.catalog.min_score = value
                    .parse::<f32>()
                    .ok()
                    .filter(|score| score.is_finite())
                    .ok_or_else(|| invalid("expected a number"))?;
            }
            ConfigKey::DownloadTimeout => {
                config.download.timeout = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| invalid("expected a positive number of seconds"))?;
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(invalid("expected trace, debug, info, warn or error"));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory =
                    non_empty_path(value).ok_or_else(|| invalid("empty path"))?;
            }
        }
        Ok(())
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn http_url(value: &str) -> Option<String> {
    (value.starts_with("http://") || value.starts_with("https://")).then(|| value.to_string())
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_split_into_section_and_key() {
        assert_eq!(ConfigKey::CacheMemorySize.section(), "cache");
        assert_eq!(ConfigKey::CacheMemorySize.key_name(), "memory_size");
        for key in ConfigKey::all() {
            assert_eq!(format!("{}.{}", key.section(), key.key_name()), key.name());
        }
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!("catalog.min_score".parse::<ConfigKey>().unwrap(), ConfigKey::CatalogMinScore);
        assert_eq!("LOGGING.LEVEL".parse::<ConfigKey>().unwrap(), ConfigKey::LoggingLevel);
        assert!(matches!(
            "cache.colour".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_set_then_get() {
        let mut config = ConfigFile::default();
        ConfigKey::CacheMemorySize.set(&mut config, "1GB").unwrap();
        ConfigKey::CatalogMinScore.set(&mut config, "2.5").unwrap();
        ConfigKey::LoggingLevel.set(&mut config, "DEBUG").unwrap();

        assert_eq!(ConfigKey::CacheMemorySize.get(&config), "1 GB");
        assert_eq!(config.cache.memory_size, 1024 * 1024 * 1024);
        assert_eq!(ConfigKey::CatalogMinScore.get(&config), "2.5");
        assert_eq!(ConfigKey::LoggingLevel.get(&config), "debug");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = ConfigFile::default();
        let before = config.clone();
        assert!(ConfigKey::DownloadTimeout.set(&mut config, "0").is_err());
        assert!(ConfigKey::DownloadTimeout.set(&mut config, "soon").is_err());
        assert!(ConfigKey::CatalogItemsUrl.set(&mut config, "ftp://x").is_err());
        assert!(ConfigKey::LoggingLevel.set(&mut config, "loud").is_err());
        assert!(ConfigKey::CacheDirectory.set(&mut config, "  ").is_err());
        assert_eq!(config, before);
    }
}
