//! Catalog payload decoding.
//!
//! The item endpoint returns a JSON array with one object per item. Records
//! are decoded one at a time through explicit schema structs so that a
//! single bad record is rejected (and reported) without losing the rest of
//! the catalog. Unknown fields are ignored.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::filter::DownloadLabels;
use super::types::{CatalogItem, Category, Tag};

/// Epoch values above this are read as milliseconds, below as seconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Known payload schema revisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadVersion {
    /// `/api/v0` item and category listings.
    #[default]
    V0,
}

/// Errors that make a whole payload unusable.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Body is not valid JSON.
    #[error("malformed catalog payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Body is JSON but not an array of records.
    #[error("unsupported catalog payload: expected an array, found {0}")]
    UnsupportedShape(&'static str),
}

/// Why a single record was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Required fields absent or null.
    MissingFields(Vec<&'static str>),
    /// Present fields with an unusable value.
    Invalid(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingFields(fields) => {
                write!(f, "missing {}", fields.join(", "))
            }
            RejectReason::Invalid(msg) => write!(f, "invalid: {}", msg),
        }
    }
}

/// A record that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the payload array.
    pub index: usize,
    /// Slug, when the record had one.
    pub slug: Option<String>,
    pub reason: RejectReason,
}

/// A validated item record whose download links are not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub item_type: String,
    pub category: String,
    pub publish_date: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub preview_image_key: Option<String>,
    /// `(title, url)` pairs in server order.
    pub download_links: Vec<(String, String)>,
}

impl ItemRecord {
    /// Build the catalog item, keeping only download links whose title is an
    /// allowed label. When two links map to the same resolution the later one
    /// wins.
    pub fn into_item(self, labels: &DownloadLabels) -> CatalogItem {
        let download_links = self
            .download_links
            .into_iter()
            .filter_map(|(title, url)| labels.resolve(&title).map(|res| (res, url)))
            .collect();

        CatalogItem {
            id: self.id,
            slug: self.slug,
            title: self.title,
            item_type: self.item_type,
            category: self.category,
            publish_date: self.publish_date,
            tags: self.tags,
            preview_image_key: self.preview_image_key,
            download_links,
        }
    }
}

/// Result of decoding an item listing.
#[derive(Debug, Default)]
pub struct DecodedItems {
    pub records: Vec<ItemRecord>,
    pub rejected: Vec<RejectedRecord>,
}

// ============================================================================
// Schema structs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItemV0 {
    id: Option<String>,
    #[serde(rename = "_id")]
    underscore_id: Option<String>,
    title: Option<String>,
    slug: Option<String>,
    item_type: Option<RawNamed>,
    category: Option<RawNamed>,
    preview_image1: Option<RawPreview>,
    publish_date: Option<RawDate>,
    #[serde(default)]
    download_links: Option<Vec<RawLink>>,
    #[serde(default)]
    tags: Option<Vec<RawTag>>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPreview {
    thumb_object_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(default)]
    title: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDate {
    Epoch(i64),
    Fractional(f64),
    Text(String),
}

impl RawDate {
    fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            RawDate::Epoch(value) => from_epoch(*value),
            RawDate::Fractional(value) => from_epoch(value.trunc() as i64),
            RawDate::Text(text) => parse_date_text(text),
        }
    }
}

fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.abs() > EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Timestamps without an offset are taken as UTC
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl RawItemV0 {
    fn validate(self, index: usize) -> Result<ItemRecord, RejectedRecord> {
        let slug = non_empty(self.slug);
        let title = non_empty(self.title);
        let category = non_empty(self.category.and_then(|c| c.name));
        let item_type = non_empty(self.item_type.and_then(|t| t.name));

        let mut missing = Vec::new();
        if slug.is_none() {
            missing.push("slug");
        }
        if title.is_none() {
            missing.push("title");
        }
        if category.is_none() {
            missing.push("category.name");
        }
        if item_type.is_none() {
            missing.push("itemType.name");
        }
        if self.publish_date.is_none() {
            missing.push("publishDate");
        }

        let (Some(slug), Some(title), Some(category), Some(item_type), Some(date)) =
            (slug, title, category, item_type, self.publish_date)
        else {
            return Err(RejectedRecord {
                index,
                slug: None,
                reason: RejectReason::MissingFields(missing),
            });
        };

        let Some(publish_date) = date.to_utc() else {
            return Err(RejectedRecord {
                index,
                slug: Some(slug),
                reason: RejectReason::Invalid(format!("unreadable publishDate {:?}", date)),
            });
        };

        Ok(ItemRecord {
            id: self.id.or(self.underscore_id).unwrap_or_default(),
            slug,
            title,
            item_type,
            category,
            publish_date,
            tags: self
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| Tag {
                    slug: t.slug,
                    text: t.text,
                })
                .collect(),
            preview_image_key: non_empty(self.preview_image1.and_then(|p| p.thumb_object_key)),
            download_links: self
                .download_links
                .unwrap_or_default()
                .into_iter()
                .map(|l| (l.title, l.value))
                .collect(),
        })
    }
}

// ============================================================================
// Decoding
// ============================================================================

fn top_level_array(json: &str) -> Result<Vec<Value>, PayloadError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(values) => Ok(values),
        Value::Object(_) => Err(PayloadError::UnsupportedShape("an object")),
        Value::String(_) => Err(PayloadError::UnsupportedShape("a string")),
        Value::Number(_) => Err(PayloadError::UnsupportedShape("a number")),
        Value::Bool(_) => Err(PayloadError::UnsupportedShape("a boolean")),
        Value::Null => Err(PayloadError::UnsupportedShape("null")),
    }
}

/// Decode an item listing.
///
/// Returns the valid records plus one [`RejectedRecord`] per record that
/// lacked a required field (`slug`, `title`, `category.name`,
/// `itemType.name`, `publishDate`) or held an unusable value. Each rejection
/// is logged at `warn`.
pub fn decode_items(json: &str, version: PayloadVersion) -> Result<DecodedItems, PayloadError> {
    let values = top_level_array(json)?;
    let mut decoded = DecodedItems::default();

    for (index, value) in values.into_iter().enumerate() {
        let result = match version {
            PayloadVersion::V0 => serde_json::from_value::<RawItemV0>(value)
                .map_err(|e| RejectedRecord {
                    index,
                    slug: None,
                    reason: RejectReason::Invalid(e.to_string()),
                })
                .and_then(|raw| raw.validate(index)),
        };

        match result {
            Ok(record) => decoded.records.push(record),
            Err(rejected) => {
                warn!(
                    index = rejected.index,
                    slug = rejected.slug.as_deref().unwrap_or("-"),
                    "Rejected catalog record: {}",
                    rejected.reason
                );
                decoded.rejected.push(rejected);
            }
        }
    }

    Ok(decoded)
}

/// Decode a category listing. Entries without a name are skipped.
pub fn decode_categories(json: &str, version: PayloadVersion) -> Result<Vec<Category>, PayloadError> {
    let values = top_level_array(json)?;
    let categories = values
        .into_iter()
        .filter_map(|value| match version {
            PayloadVersion::V0 => serde_json::from_value::<RawNamed>(value).ok(),
        })
        .filter_map(|raw| non_empty(raw.name))
        .map(|name| Category { name })
        .collect();
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::Resolution;
    use chrono::{Datelike, TimeZone};

    const FULL_RECORD: &str = r#"[{
        "_id": "65a1",
        "title": "Amethyst",
        "slug": "amethyst-1",
        "itemType": {"name": "Textures"},
        "category": {"name": "Rock"},
        "previewImage1": {"thumbObjectKey": "u/abc/amethyst.webp"},
        "publishDate": "2024-02-10T08:30:00.000Z",
        "downloadLinks": [
            {"title": "1K", "value": "https://dl/1k.zip"},
            {"title": "2k Textures", "value": "https://dl/2k.zip"},
            {"title": "SBSAR", "value": "https://dl/x.sbsar"}
        ],
        "tags": [{"slug": "purple", "text": "purple"}],
        "likes": 42
    }]"#;

    #[test]
    fn test_decode_full_record() {
        let decoded = decode_items(FULL_RECORD, PayloadVersion::V0).unwrap();
        assert!(decoded.rejected.is_empty());
        let record = &decoded.records[0];
        assert_eq!(record.id, "65a1");
        assert_eq!(record.slug, "amethyst-1");
        assert_eq!(record.category, "Rock");
        assert_eq!(record.item_type, "Textures");
        assert_eq!(record.preview_image_key.as_deref(), Some("u/abc/amethyst.webp"));
        assert_eq!(record.publish_date, Utc.with_ymd_and_hms(2024, 2, 10, 8, 30, 0).unwrap());
        assert_eq!(record.download_links.len(), 3);
        assert_eq!(record.tags[0].text, "purple");
    }

    #[test]
    fn test_into_item_normalizes_links() {
        let mut decoded = decode_items(FULL_RECORD, PayloadVersion::V0).unwrap();
        let item = decoded.records.remove(0).into_item(&DownloadLabels::standard());
        assert_eq!(item.download_link(Resolution::OneK), Some("https://dl/1k.zip"));
        assert_eq!(item.download_link(Resolution::TwoK), Some("https://dl/2k.zip"));
        assert_eq!(item.download_links.len(), 2);
    }

    #[test]
    fn test_into_item_last_duplicate_wins() {
        let json = r#"[{"slug":"a","title":"A","itemType":{"name":"Textures"},
            "category":{"name":"Rock"},"publishDate":0,
            "downloadLinks":[{"title":"1k","value":"first"},{"title":"1K Textures","value":"second"}]}]"#;
        let mut decoded = decode_items(json, PayloadVersion::V0).unwrap();
        let item = decoded.records.remove(0).into_item(&DownloadLabels::standard());
        assert_eq!(item.download_link(Resolution::OneK), Some("second"));
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let json = r#"[
            {"slug":"ok","title":"Ok","itemType":{"name":"Textures"},"category":{"name":"Rock"},"publishDate":1700000000},
            {"title":"No slug","itemType":{"name":"Textures"},"category":{}},
            {"slug":"b","title":"B","itemType":null,"category":{"name":"Rock"},"publishDate":1}
        ]"#;
        let decoded = decode_items(json, PayloadVersion::V0).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.rejected.len(), 2);
        assert_eq!(decoded.rejected[0].index, 1);
        assert_eq!(
            decoded.rejected[0].reason,
            RejectReason::MissingFields(vec!["slug", "category.name", "publishDate"])
        );
        assert_eq!(
            decoded.rejected[1].reason,
            RejectReason::MissingFields(vec!["itemType.name"])
        );
    }

    #[test]
    fn test_wrong_field_type_rejects_only_that_record() {
        let json = r#"[
            {"slug":42,"title":"Bad","itemType":{"name":"Textures"},"category":{"name":"Rock"},"publishDate":1},
            {"slug":"good","title":"Good","itemType":{"name":"Textures"},"category":{"name":"Rock"},"publishDate":1}
        ]"#;
        let decoded = decode_items(json, PayloadVersion::V0).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert!(matches!(decoded.rejected[0].reason, RejectReason::Invalid(_)));
    }

    #[test]
    fn test_unreadable_date_is_invalid() {
        let json = r#"[{"slug":"a","title":"A","itemType":{"name":"Textures"},
            "category":{"name":"Rock"},"publishDate":"last tuesday"}]"#;
        let decoded = decode_items(json, PayloadVersion::V0).unwrap();
        assert_eq!(decoded.rejected[0].slug.as_deref(), Some("a"));
        assert!(matches!(decoded.rejected[0].reason, RejectReason::Invalid(_)));
    }

    #[test]
    fn test_epoch_seconds_and_millis() {
        let seconds = RawDate::Epoch(1_700_000_000).to_utc().unwrap();
        let millis = RawDate::Epoch(1_700_000_000_000).to_utc().unwrap();
        assert_eq!(seconds, millis);
        assert_eq!(seconds.year(), 2023);
    }

    #[test]
    fn test_date_without_offset_is_utc() {
        let parsed = parse_date_text("2024-02-10T08:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 2, 10, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_id_field_accepted() {
        let json = r#"[{"id":"x1","slug":"a","title":"A","itemType":{"name":"Textures"},
            "category":{"name":"Rock"},"publishDate":1}]"#;
        let decoded = decode_items(json, PayloadVersion::V0).unwrap();
        assert_eq!(decoded.records[0].id, "x1");
    }

    #[test]
    fn test_malformed_and_wrong_shape() {
        assert!(matches!(
            decode_items("[{", PayloadVersion::V0),
            Err(PayloadError::Malformed(_))
        ));
        assert!(matches!(
            decode_items(r#"{"items":[]}"#, PayloadVersion::V0),
            Err(PayloadError::UnsupportedShape("an object"))
        ));
    }

    #[test]
    fn test_decode_categories_skips_unnamed() {
        let json = r#"[{"name":"Rock"},{"name":""},{"slug":"x"},{"name":"Wood","count":3}]"#;
        let categories = decode_categories(json, PayloadVersion::V0).unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rock", "Wood"]);
    }
}
