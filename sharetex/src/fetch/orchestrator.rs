//! Cache-first fetch orchestration.
//!
//! Every user action that needs remote content goes through
//! [`FetchOrchestrator`], which answers from the [`CacheStore`] when it can
//! and otherwise starts (or joins) exactly one network fetch per key.

use std::path::PathBuf;
use std::sync::Arc;

use futures::future::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::archive::ArchiveReader;
use super::error::FetchError;
use super::http::HttpClient;
use super::import::{import_entries, ImportReport};
use crate::cache::{AssetKey, AssetOutcome, CacheStore, ImageHandle, ThumbnailOutcome};
use crate::catalog::{
    decode_categories, decode_items, CatalogItem, Category, DecodedItems, Endpoints,
    PayloadVersion,
};
use crate::naming::RenameRules;
use crate::resolution::Resolution;

/// An asset folder produced by a download.
#[derive(Debug, Clone)]
pub struct DownloadedAsset {
    pub directory: PathBuf,
    /// Per-entry outcome of the import. Shared by every coalesced caller.
    pub report: Arc<ImportReport>,
}

/// How an asset request was satisfied.
#[derive(Debug, Clone)]
pub enum AssetFetch {
    /// Already on disk; no request was made.
    Cached(PathBuf),
    /// Downloaded and promoted into the cache by this request or one it
    /// joined.
    Downloaded(DownloadedAsset),
}

impl AssetFetch {
    pub fn directory(&self) -> &PathBuf {
        match self {
            AssetFetch::Cached(dir) => dir,
            AssetFetch::Downloaded(asset) => &asset.directory,
        }
    }

    pub fn was_cached(&self) -> bool {
        matches!(self, AssetFetch::Cached(_))
    }
}

/// Collaborators a download needs, cloned into each fetch future.
#[derive(Clone)]
struct FetchContext {
    http: Arc<dyn HttpClient>,
    archives: Arc<dyn ArchiveReader>,
    store: Arc<CacheStore>,
    rules: Arc<RenameRules>,
}

/// Decides per request whether the cache satisfies it before going to the
/// network.
pub struct FetchOrchestrator {
    ctx: FetchContext,
    endpoints: Endpoints,
}

impl FetchOrchestrator {
    pub fn new(
        http: Arc<dyn HttpClient>,
        archives: Arc<dyn ArchiveReader>,
        store: Arc<CacheStore>,
        rules: Arc<RenameRules>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            ctx: FetchContext {
                http,
                archives,
                store,
                rules,
            },
            endpoints,
        }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.ctx.store
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Download and decode the item listing.
    pub async fn fetch_catalog(&self) -> Result<DecodedItems, FetchError> {
        let body = self.ctx.http.get(&self.endpoints.items_url).await?;
        let decoded = decode_items(&String::from_utf8_lossy(&body), PayloadVersion::V0)?;
        info!(
            items = decoded.records.len(),
            rejected = decoded.rejected.len(),
            "Catalog fetched"
        );
        Ok(decoded)
    }

    /// Download and decode the category listing.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        let body = self.ctx.http.get(&self.endpoints.categories_url).await?;
        let categories = decode_categories(&String::from_utf8_lossy(&body), PayloadVersion::V0)?;
        debug!(count = categories.len(), "Categories fetched");
        Ok(categories)
    }

    /// Cache key of `item` at `resolution`.
    pub fn asset_key(item: &CatalogItem, resolution: Resolution) -> AssetKey {
        AssetKey::new(item.category.clone(), resolution, item.slug.clone())
    }

    /// Make sure `item` at `resolution` is in the cache.
    ///
    /// Returns immediately when the asset folder exists. Otherwise downloads
    /// the archive, renames its textures into a staging folder and promotes
    /// it. Concurrent calls for the same asset share one download.
    pub async fn ensure_asset(
        &self,
        item: &CatalogItem,
        resolution: Resolution,
    ) -> Result<AssetFetch, FetchError> {
        let key = Self::asset_key(item, resolution);
        if self.ctx.store.has_asset(&key) {
            return Ok(AssetFetch::Cached(self.ctx.store.asset_directory(&key)));
        }

        let url = item
            .download_link(resolution)
            .ok_or_else(|| FetchError::MissingLink {
                slug: item.slug.clone(),
                resolution,
            })?
            .to_string();

        let ctx = self.ctx.clone();
        let work_key = key.clone();
        self.ctx
            .store
            .asset_flights()
            .run(key, move || download_asset(ctx, work_key, url).boxed())
            .await
            .map(AssetFetch::Downloaded)
    }

    /// [`ensure_asset`](Self::ensure_asset) that gives up when `cancel` fires.
    ///
    /// A cancelled download leaves no asset folder behind. If other callers
    /// are waiting on the same download it carries on for them.
    pub async fn ensure_asset_cancellable(
        &self,
        item: &CatalogItem,
        resolution: Resolution,
        cancel: &CancellationToken,
    ) -> Result<AssetFetch, FetchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(slug = %item.slug, %resolution, "Download cancelled");
                Err(FetchError::Cancelled)
            }
            result = self.ensure_asset(item, resolution) => result,
        }
    }

    /// Decoded preview image for `item`, fetched once and cached on disk.
    ///
    /// `Ok(None)` means the preview downloaded but could not be decoded.
    pub async fn ensure_thumbnail(&self, item: &CatalogItem) -> Result<Option<ImageHandle>, FetchError> {
        if let Some(image) = self.ctx.store.get_image(&item.slug) {
            return Ok(Some(image));
        }

        let object_key = item
            .preview_image_key
            .as_deref()
            .ok_or_else(|| FetchError::MissingPreview(item.slug.clone()))?;
        let url = self.endpoints.thumbnail_url(object_key);

        let ctx = self.ctx.clone();
        let slug = item.slug.clone();
        self.ctx
            .store
            .thumbnail_flights()
            .run(item.slug.clone(), move || download_thumbnail(ctx, slug, url).boxed())
            .await
    }
}

async fn download_asset(ctx: FetchContext, key: AssetKey, url: String) -> AssetOutcome {
    if ctx.store.has_asset(&key) {
        return Ok(DownloadedAsset {
            directory: ctx.store.asset_directory(&key),
            report: Arc::new(ImportReport::default()),
        });
    }

    info!(key = %key, url = %url, "Downloading asset");
    let bytes = ctx.http.get(&url).await?;
    debug!(key = %key, bytes = bytes.len(), "Archive downloaded");

    let entries = ctx.archives.entries(&bytes)?;
    let staged = ctx.store.begin_asset(&key)?;
    let report = import_entries(entries, &staged, &ctx.rules)?;

    if report.is_empty() {
        return Err(FetchError::NothingImported(key.slug.clone()));
    }

    let directory = staged.commit()?;
    info!(
        key = %key,
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Asset imported"
    );

    Ok(DownloadedAsset {
        directory,
        report: Arc::new(report),
    })
}

async fn download_thumbnail(ctx: FetchContext, slug: String, url: String) -> ThumbnailOutcome {
    debug!(slug = %slug, url = %url, "Downloading preview");
    let bytes = ctx.http.get(&url).await?;
    ctx.store.put_image_bytes(&slug, &bytes)?;
    Ok(ctx.store.get_image(&slug))
}
