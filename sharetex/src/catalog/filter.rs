//! Catalog visibility and ranking.
//!
//! Filtering happens in two stages. [`CatalogFilter::ingest`] applies the
//! static visibility rules once per catalog refresh. [`CatalogFilter::ranked`]
//! then scores the surviving items against each query.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::payload::ItemRecord;
use super::search::{score, split_terms};
use super::types::{CatalogItem, Category, CategoryCount, ScoredItem};
use crate::resolution::Resolution;

const DEFAULT_HIDDEN_CATEGORIES: &[&str] = &["Surface Imperfection", "SBSAR", "Other"];
const DEFAULT_HIDDEN_NAME_WORDS: &[&str] = &["Set", "Package", "Real"];
const DEFAULT_VISIBLE_TYPES: &[&str] = &["Textures"];

/// Static rules deciding which catalog items are shown at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityRules {
    pub hidden_categories: Vec<String>,
    /// Whole title words that hide an item ("Set" hides "Brick Set").
    pub hidden_name_words: Vec<String>,
    pub visible_types: Vec<String>,
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(value))
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl VisibilityRules {
    /// Built-in rules.
    pub fn standard() -> Self {
        Self {
            hidden_categories: owned(DEFAULT_HIDDEN_CATEGORIES),
            hidden_name_words: owned(DEFAULT_HIDDEN_NAME_WORDS),
            visible_types: owned(DEFAULT_VISIBLE_TYPES),
        }
    }

    pub fn is_hidden_category(&self, category: &str) -> bool {
        contains_ignore_case(&self.hidden_categories, category)
    }

    /// Whether `item` passes every rule at time `now`.
    pub fn allows(&self, item: &CatalogItem, now: DateTime<Utc>) -> bool {
        contains_ignore_case(&self.visible_types, &item.item_type)
            && !self.is_hidden_category(&item.category)
            && item.publish_date <= now
            && !split_terms(&item.title)
                .any(|word| contains_ignore_case(&self.hidden_name_words, word))
    }
}

impl Default for VisibilityRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Allow-list of download link titles and the resolution each stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLabels {
    labels: Vec<(String, Resolution)>,
}

impl DownloadLabels {
    pub fn new(labels: Vec<(String, Resolution)>) -> Self {
        Self { labels }
    }

    /// `1k`, `1k Textures` and their upper-case forms for every tier.
    pub fn standard() -> Self {
        let mut labels = Vec::new();
        for res in Resolution::ALL {
            let upper = res.as_str();
            let lower = upper.to_lowercase();
            labels.push((lower.clone(), res));
            labels.push((upper.to_string(), res));
            labels.push((format!("{} Textures", lower), res));
            labels.push((format!("{} Textures", upper), res));
        }
        Self { labels }
    }

    /// Resolution for a link title, if the title is allowed.
    pub fn resolve(&self, title: &str) -> Option<Resolution> {
        let title = title.trim();
        self.labels
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(title))
            .map(|(_, res)| *res)
    }

    pub fn labels(&self) -> &[(String, Resolution)] {
        &self.labels
    }
}

impl Default for DownloadLabels {
    fn default() -> Self {
        Self::standard()
    }
}

/// Holds the visible catalog and answers search queries over it.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    visibility: VisibilityRules,
    labels: DownloadLabels,
    items: Vec<CatalogItem>,
    categories: Vec<Category>,
}

impl CatalogFilter {
    pub fn new(visibility: VisibilityRules, labels: DownloadLabels) -> Self {
        Self {
            visibility,
            labels,
            items: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Replace the catalog with the visible subset of `records`.
    ///
    /// Download links are normalized here. Returns the number of items kept.
    pub fn ingest(&mut self, records: Vec<ItemRecord>, now: DateTime<Utc>) -> usize {
        let total = records.len();
        self.items = records
            .into_iter()
            .map(|record| record.into_item(&self.labels))
            .filter(|item| self.visibility.allows(item, now))
            .collect();
        debug!(total, kept = self.items.len(), "Catalog ingested");
        self.items.len()
    }

    /// Replace the category list, dropping hidden categories.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories
            .into_iter()
            .filter(|c| !self.visibility.is_hidden_category(&c.name))
            .collect();
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a visible item by slug.
    pub fn find(&self, slug: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.slug == slug)
    }

    /// Items matching `query`, best first, with the default resolution.
    pub fn visible_items(
        &self,
        query: &str,
        selected_category: Option<&str>,
        min_score: f32,
    ) -> Vec<ScoredItem<'_>> {
        self.ranked(query, selected_category, min_score, Resolution::default())
    }

    /// Items scoring above `min_score` in the selected category (any category
    /// when `None`), sorted by score then by publish date, newest first.
    pub fn ranked(
        &self,
        query: &str,
        selected_category: Option<&str>,
        min_score: f32,
        preferred: Resolution,
    ) -> Vec<ScoredItem<'_>> {
        let mut scored: Vec<ScoredItem<'_>> = self
            .items
            .iter()
            .filter(|item| {
                selected_category.map_or(true, |c| item.category.eq_ignore_ascii_case(c))
            })
            .filter_map(|item| {
                let score = score(item, query);
                (score > min_score).then(|| ScoredItem {
                    item,
                    score,
                    resolution: item.pick_resolution(preferred),
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.item.publish_date.cmp(&a.item.publish_date))
        });
        scored
    }

    /// Visible item count per category, ignoring any query.
    ///
    /// Uses the category list order when one was set, otherwise every
    /// category present in the catalog, sorted by name.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let count_of = |name: &str| {
            self.items
                .iter()
                .filter(|item| item.category.eq_ignore_ascii_case(name))
                .count()
        };

        if !self.categories.is_empty() {
            return self
                .categories
                .iter()
                .map(|c| CategoryCount {
                    name: c.name.clone(),
                    count: count_of(&c.name),
                })
                .collect();
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.category.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(name, count)| CategoryCount {
                name: name.to_string(),
                count,
            })
            .collect()
    }
}
