//! CLI error type.

use std::fmt;

use sharetex::cache::CacheError;
use sharetex::config::ConfigError;
use sharetex::fetch::FetchError;

/// Errors reported by CLI commands before exiting with a failure status.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem, with a message for the user.
    Config(String),
    /// Loading or saving `config.ini` failed.
    ConfigFile(ConfigError),
    /// A network fetch or import failed.
    Fetch(FetchError),
    /// A cache operation failed.
    Cache(CacheError),
    /// No visible catalog item has this slug.
    UnknownItem(String),
    /// Some names given to `parse` could not be parsed.
    Unparsed(usize),
    /// The async runtime could not be started.
    Runtime(String),
    /// The user declined a confirmation prompt.
    Aborted,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Fetch(e) => write!(f, "{}", e),
            CliError::Cache(e) => write!(f, "{}", e),
            CliError::UnknownItem(slug) => write!(
                f,
                "No catalog item '{}'. Use 'sharetex search' to find slugs.",
                slug
            ),
            CliError::Unparsed(count) => write!(f, "{} name(s) could not be parsed", count),
            CliError::Runtime(msg) => write!(f, "Failed to start runtime: {}", msg),
            CliError::Aborted => write!(f, "Aborted"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}

impl From<CacheError> for CliError {
    fn from(e: CacheError) -> Self {
        CliError::Cache(e)
    }
}
