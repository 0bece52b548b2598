//! Catalog domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::resolution::Resolution;

/// How long after publication an item counts as new.
pub const RECENT_PUBLISH_WINDOW_DAYS: i64 = 3;

/// A tag attached to a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub slug: String,
    pub text: String,
}

/// A catalog category as listed by the category endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
}

/// One downloadable texture set.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Opaque server id.
    pub id: String,
    /// Stable short identifier; part of every cache key.
    pub slug: String,
    pub title: String,
    /// Item type name (only "Textures" items are shown by default).
    pub item_type: String,
    pub category: String,
    pub publish_date: DateTime<Utc>,
    /// Tags in server order.
    pub tags: Vec<Tag>,
    /// Object key of the preview image on the image host.
    pub preview_image_key: Option<String>,
    /// Download URL per resolution, one link per tier at most.
    pub download_links: BTreeMap<Resolution, String>,
}

impl CatalogItem {
    /// Download URL for a resolution, if the item offers it.
    pub fn download_link(&self, resolution: Resolution) -> Option<&str> {
        self.download_links.get(&resolution).map(String::as_str)
    }

    /// Offered resolutions, lowest first.
    pub fn available_resolutions(&self) -> Vec<Resolution> {
        self.download_links.keys().copied().collect()
    }

    /// Keep `preferred` if offered, otherwise fall back to the lowest offered
    /// resolution. `None` when the item has no download links at all.
    pub fn pick_resolution(&self, preferred: Resolution) -> Option<Resolution> {
        if self.download_links.contains_key(&preferred) {
            Some(preferred)
        } else {
            self.download_links.keys().next().copied()
        }
    }

    /// Whether the item was published less than three days before `now`.
    pub fn is_recently_published(&self, now: DateTime<Utc>) -> bool {
        let age = now - self.publish_date;
        age >= Duration::zero() && age < Duration::days(RECENT_PUBLISH_WINDOW_DAYS)
    }
}

/// A catalog item scored against one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem<'a> {
    pub item: &'a CatalogItem,
    pub score: f32,
    /// Resolution that a download of this row would use.
    pub resolution: Option<Resolution>,
}

/// Number of visible items in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal item for tests; adjust fields with struct update syntax.
    pub fn item(slug: &str, title: &str, category: &str, publish_date: DateTime<Utc>) -> CatalogItem {
        CatalogItem {
            id: format!("id-{}", slug),
            slug: slug.to_string(),
            title: title.to_string(),
            item_type: "Textures".to_string(),
            category: category.to_string(),
            publish_date,
            tags: Vec::new(),
            preview_image_key: None,
            download_links: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::item;
    use super::*;

    fn with_links(links: &[(Resolution, &str)]) -> CatalogItem {
        let mut it = item("rock-1", "Rock", "Rock", Utc::now());
        it.download_links = links
            .iter()
            .map(|(res, url)| (*res, url.to_string()))
            .collect();
        it
    }

    #[test]
    fn test_download_link_lookup() {
        let it = with_links(&[(Resolution::TwoK, "https://dl/2k.zip")]);
        assert_eq!(it.download_link(Resolution::TwoK), Some("https://dl/2k.zip"));
        assert_eq!(it.download_link(Resolution::OneK), None);
    }

    #[test]
    fn test_available_resolutions_sorted() {
        let it = with_links(&[(Resolution::FourK, "c"), (Resolution::OneK, "a")]);
        assert_eq!(
            it.available_resolutions(),
            vec![Resolution::OneK, Resolution::FourK]
        );
    }

    #[test]
    fn test_pick_resolution_prefers_requested() {
        let it = with_links(&[(Resolution::OneK, "a"), (Resolution::TwoK, "b")]);
        assert_eq!(it.pick_resolution(Resolution::TwoK), Some(Resolution::TwoK));
        assert_eq!(it.pick_resolution(Resolution::FourK), Some(Resolution::OneK));
        assert_eq!(with_links(&[]).pick_resolution(Resolution::OneK), None);
    }

    #[test]
    fn test_recently_published_window() {
        let now = Utc::now();
        let fresh = item("a", "A", "Rock", now - Duration::days(2));
        let old = item("b", "B", "Rock", now - Duration::days(3));
        let future = item("c", "C", "Rock", now + Duration::hours(1));
        assert!(fresh.is_recently_published(now));
        assert!(!old.is_recently_published(now));
        assert!(!future.is_recently_published(now));
    }
}
