//! Immutable runtime settings.

use std::path::PathBuf;
use std::sync::Arc;

use super::file::ConfigFile;
use crate::cache::CacheStore;
use crate::catalog::{CatalogFilter, DownloadLabels, Endpoints, VisibilityRules};
use crate::fetch::{FetchError, FetchOrchestrator, HttpClient, ReqwestClient, ZipArchiveReader};
use crate::naming::RenameRules;

/// Everything the library needs at run time, built once at start-up and
/// passed by reference.
#[derive(Debug, Clone)]
pub struct Settings {
    pub cache_root: PathBuf,
    /// Memory tier budget in bytes.
    pub memory_size: u64,
    pub min_score: f32,
    pub visibility: VisibilityRules,
    pub download_labels: DownloadLabels,
    pub rename_rules: Arc<RenameRules>,
    pub endpoints: Endpoints,
    pub timeout_secs: u64,
    pub log_level: String,
    pub log_directory: PathBuf,
}

impl Settings {
    /// Combine the user's file with the built-in rule tables.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            cache_root: config.cache.directory.clone(),
            memory_size: config.cache.memory_size as u64,
            min_score: config.catalog.min_score,
            visibility: VisibilityRules::standard(),
            download_labels: DownloadLabels::standard(),
            rename_rules: Arc::new(RenameRules::standard().clone()),
            endpoints: Endpoints {
                items_url: config.catalog.items_url.clone(),
                categories_url: config.catalog.categories_url.clone(),
                image_host: config.catalog.image_host.clone(),
            },
            timeout_secs: config.download.timeout,
            log_level: config.logging.level.clone(),
            log_directory: config.logging.directory.clone(),
        }
    }

    pub fn cache_store(&self) -> CacheStore {
        CacheStore::new(&self.cache_root, self.memory_size)
    }

    /// An empty filter using these visibility rules and download labels.
    pub fn catalog_filter(&self) -> CatalogFilter {
        CatalogFilter::new(self.visibility.clone(), self.download_labels.clone())
    }

    /// Orchestrator over a fresh cache store and the given HTTP client.
    pub fn orchestrator_with(&self, http: Arc<dyn HttpClient>) -> FetchOrchestrator {
        FetchOrchestrator::new(
            http,
            Arc::new(ZipArchiveReader),
            Arc::new(self.cache_store()),
            Arc::clone(&self.rename_rules),
            self.endpoints.clone(),
        )
    }

    /// Orchestrator using a reqwest client with the configured timeout.
    pub fn orchestrator(&self) -> Result<FetchOrchestrator, FetchError> {
        let http = ReqwestClient::with_timeout(self.timeout_secs)?;
        Ok(self.orchestrator_with(Arc::new(http)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config_file(&ConfigFile::default())
    }
}
