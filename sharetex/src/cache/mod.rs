//! Two-tier texture cache.
//!
//! - memory: decoded preview images, weighted by pixel bytes (`moka`)
//! - disk: preview files and downloaded asset folders
//!
//! Asset folders are populated through a [`StagedAsset`] and promoted by a
//! single rename, and concurrent fetches of one key are coalesced through
//! the [`InFlight`] registries held by the [`CacheStore`].

mod disk;
mod error;
mod inflight;
mod key;
mod memory;
mod preview;
mod staging;
mod store;

pub use disk::{clear_directory, disk_usage, ClearResult};
pub use error::CacheError;
pub use inflight::InFlight;
pub use key::{AssetKey, IMPORT_ROOT};
pub use memory::{MemoryImageCache, MemoryStats};
pub use preview::{decode_image, ImageHandle};
pub use staging::{StagedAsset, STAGING_DIR_NAME};
pub use store::{AssetOutcome, CacheStats, CacheStore, ThumbnailOutcome, THUMBNAILS_DIR};
