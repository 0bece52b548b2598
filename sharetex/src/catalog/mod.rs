//! Remote texture catalog: payload decoding, visibility rules and search.
//!
//! ```text
//! JSON payload ─► decode_items ─► ItemRecord ─► CatalogFilter::ingest ─► CatalogItem
//!                                                        │
//!                                      query ─► ranked ─►┴─► Vec<ScoredItem>
//! ```

mod filter;
mod payload;
mod search;
mod types;
mod urls;

pub use filter::{CatalogFilter, DownloadLabels, VisibilityRules};
pub use payload::{
    decode_categories, decode_items, DecodedItems, ItemRecord, PayloadError, PayloadVersion,
    RejectReason, RejectedRecord,
};
pub use search::{
    score, EMPTY_QUERY_SCORE, EXACT_TITLE_SCORE, PARTIAL_TITLE_SCORE, TERM_MATCH_SCORE,
};
pub use types::{
    CatalogItem, Category, CategoryCount, ScoredItem, Tag, RECENT_PUBLISH_WINDOW_DAYS,
};
pub use urls::{Endpoints, DEFAULT_CATEGORIES_URL, DEFAULT_IMAGE_HOST, DEFAULT_ITEMS_URL};
