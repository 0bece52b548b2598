//! In-memory tier of decoded preview images, backed by `moka::sync::Cache`.
//!
//! Entries are weighted by their decoded pixel size, so the capacity is a
//! byte budget rather than an entry count. Evicted entries are rebuilt from
//! the disk tier on the next lookup.

use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;

use super::preview::ImageHandle;

/// Hit/miss counters for the memory tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub size_bytes: u64,
    pub max_size_bytes: u64,
}

/// Decoded images keyed by slug.
pub struct MemoryImageCache {
    cache: Cache<String, ImageHandle>,
    max_size_bytes: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Create a cache holding at most `max_size_bytes` of decoded pixels.
    pub fn new(max_size_bytes: u64) -> Self {
        let cache = Cache::builder()
            // moka weights are u32; oversized images saturate
            .weigher(|_slug: &String, image: &ImageHandle| -> u32 {
                image.byte_len().min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes)
            .build();

        Self {
            cache,
            max_size_bytes,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, slug: &str) -> Option<ImageHandle> {
        match self.cache.get(slug) {
            Some(image) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(image)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, slug: &str, image: ImageHandle) {
        self.cache.insert(slug.to_string(), image);
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.cache.contains_key(slug)
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    pub fn stats(&self) -> MemoryStats {
        self.cache.run_pending_tasks();
        MemoryStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
            size_bytes: self.cache.weighted_size(),
            max_size_bytes: self.max_size_bytes,
        }
    }
}

impl std::fmt::Debug for MemoryImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryImageCache")
            .field("entries", &self.cache.entry_count())
            .field("max_size_bytes", &self.max_size_bytes)
            .finish()
    }
}
