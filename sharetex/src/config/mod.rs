//! Configuration: the INI file, its key registry and the runtime settings
//! built from it.

mod error;
mod file;
mod keys;
mod settings;
mod size;

pub use error::ConfigError;
pub use file::{
    config_file_path, default_cache_dir, default_log_dir, CacheConfig, CatalogConfig, ConfigFile,
    DownloadConfig, LoggingConfig, DEFAULT_LOG_LEVEL, DEFAULT_MEMORY_SIZE, DEFAULT_MIN_SCORE,
};
pub use keys::ConfigKey;
pub use settings::Settings;
pub use size::{format_size, parse_size};
