//! INI configuration file.
//!
//! ```ini
//! [cache]
//! directory = /home/user/.cache/sharetex
//! memory_size = 256 MB
//!
//! [catalog]
//! items_url = https://api2.sharetextures.com/api/v0/item/s?limit=9999
//! categories_url = https://api2.sharetextures.com/api/v0/category/list/by/63334c7b180bb34fa67996e4
//! image_host = https://images.sharetextures.com
//! min_score = 0.5
//!
//! [download]
//! timeout = 300
//!
//! [logging]
//! level = info
//! directory = /home/user/.local/share/sharetex/logs
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;

use super::error::ConfigError;
use super::keys::ConfigKey;
use super::size::format_size;
use crate::catalog::{DEFAULT_CATEGORIES_URL, DEFAULT_IMAGE_HOST, DEFAULT_ITEMS_URL};
use crate::fetch::DEFAULT_TIMEOUT_SECS;

const APP_DIR: &str = "sharetex";
const CONFIG_FILE_NAME: &str = "config.ini";

/// Default memory tier budget.
pub const DEFAULT_MEMORY_SIZE: usize = 256 * 1024 * 1024;
/// Default minimum search score.
pub const DEFAULT_MIN_SCORE: f32 = 0.5;
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `{config dir}/sharetex/config.ini`.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

/// `{cache dir}/sharetex`.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// `{local data dir}/sharetex/logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("logs")
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub directory: PathBuf,
    /// Memory tier budget in bytes.
    pub memory_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub items_url: String,
    pub categories_url: String,
    pub image_host: String,
    pub min_score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: PathBuf,
}

/// Parsed contents of `config.ini`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub cache: CacheConfig,
    pub catalog: CatalogConfig,
    pub download: DownloadConfig,
    pub logging: LoggingConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            cache: CacheConfig {
                directory: default_cache_dir(),
                memory_size: DEFAULT_MEMORY_SIZE,
            },
            catalog: CatalogConfig {
                items_url: DEFAULT_ITEMS_URL.to_string(),
                categories_url: DEFAULT_CATEGORIES_URL.to_string(),
                image_host: DEFAULT_IMAGE_HOST.to_string(),
                min_score: DEFAULT_MIN_SCORE,
            },
            download: DownloadConfig {
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            logging: LoggingConfig {
                level: DEFAULT_LOG_LEVEL.to_string(),
                directory: default_log_dir(),
            },
        }
    }
}

impl ConfigFile {
    /// Load from [`config_file_path`]. A missing file gives the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file gives the defaults; keys absent from
    /// the file keep their default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Build from parsed INI data on top of the defaults.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Every key with its current value.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Save to [`config_file_path`].
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    /// Memory size as written to the file.
    pub(crate) fn memory_size_text(&self) -> String {
        format_size(self.cache.memory_size)
    }
}
