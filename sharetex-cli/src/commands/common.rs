//! Types and helpers shared across CLI commands.

use chrono::Utc;
use clap::ValueEnum;
use sharetex::catalog::{CatalogFilter, CatalogItem};
use sharetex::config::{ConfigFile, Settings};
use sharetex::fetch::FetchOrchestrator;
use sharetex::logging::{init_logging, LoggerGuard};
use sharetex::Resolution;
use tokio::runtime::Runtime;

use crate::error::CliError;

/// Resolution selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ResolutionArg {
    #[value(name = "1k", alias = "1K")]
    OneK,
    #[value(name = "2k", alias = "2K")]
    TwoK,
    #[value(name = "4k", alias = "4K")]
    FourK,
}

impl From<ResolutionArg> for Resolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::OneK => Resolution::OneK,
            ResolutionArg::TwoK => Resolution::TwoK,
            ResolutionArg::FourK => Resolution::FourK,
        }
    }
}

/// Settings, logging and runtime for commands that talk to the catalog or
/// the cache.
pub struct CliContext {
    pub settings: Settings,
    runtime: Runtime,
    _logger: Option<LoggerGuard>,
}

impl CliContext {
    /// Load `config.ini` (falling back to defaults), start logging and build
    /// a single-threaded runtime.
    pub fn load(verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load().unwrap_or_else(|e| {
            eprintln!("Warning: {}. Using default configuration.", e);
            ConfigFile::default()
        });
        let settings = Settings::from_config_file(&config);

        let level = if verbose { "debug" } else { settings.log_level.as_str() };
        // Logging is best effort; commands still run without a log file
        let logger = match init_logging(&settings.log_directory, level) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!(
                    "Warning: logging disabled ({}): {}",
                    settings.log_directory.display(),
                    e
                );
                None
            }
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(e.to_string()))?;

        Ok(Self {
            settings,
            runtime,
            _logger: logger,
        })
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn orchestrator(&self) -> Result<FetchOrchestrator, CliError> {
        Ok(self.settings.orchestrator()?)
    }
}

/// Fetch items and categories and filter them into a browsable catalog.
pub async fn load_catalog(
    settings: &Settings,
    orchestrator: &FetchOrchestrator,
) -> Result<CatalogFilter, CliError> {
    let decoded = orchestrator.fetch_catalog().await?;
    if !decoded.rejected.is_empty() {
        tracing::warn!(
            count = decoded.rejected.len(),
            "Some catalog records were rejected"
        );
    }

    let mut filter = settings.catalog_filter();
    let visible = filter.ingest(decoded.records, Utc::now());

    match orchestrator.fetch_categories().await {
        Ok(categories) => filter.set_categories(categories),
        // Counts fall back to the categories present in the catalog
        Err(e) => tracing::warn!(error = %e, "Category list unavailable"),
    }

    tracing::debug!(visible, "Catalog loaded");
    Ok(filter)
}

/// Look up a visible item by slug.
pub fn find_item<'a>(filter: &'a CatalogFilter, slug: &str) -> Result<&'a CatalogItem, CliError> {
    filter
        .find(slug)
        .ok_or_else(|| CliError::UnknownItem(slug.to_string()))
}
