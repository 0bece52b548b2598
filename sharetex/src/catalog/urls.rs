//! Remote catalog endpoints.

pub const DEFAULT_ITEMS_URL: &str = "https://api2.sharetextures.com/api/v0/item/s?limit=9999";
pub const DEFAULT_CATEGORIES_URL: &str =
    "https://api2.sharetextures.com/api/v0/category/list/by/63334c7b180bb34fa67996e4";
pub const DEFAULT_IMAGE_HOST: &str = "https://images.sharetextures.com";

/// Where the catalog, its categories and its preview images live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub items_url: String,
    pub categories_url: String,
    pub image_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            items_url: DEFAULT_ITEMS_URL.to_string(),
            categories_url: DEFAULT_CATEGORIES_URL.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
        }
    }
}

impl Endpoints {
    /// Preview image URL for a thumbnail object key.
    ///
    /// The host serves WebP previews, but a PNG copy sits next to each one
    /// under `/u/original/`, so the key is rewritten to point there.
    pub fn thumbnail_url(&self, object_key: &str) -> String {
        let url = format!(
            "{}/{}",
            self.image_host.trim_end_matches('/'),
            object_key.trim_start_matches('/')
        );
        url.replace(".webp", ".png").replace("/u/", "/u/original/")
    }
}
