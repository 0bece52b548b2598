//! Free-text scoring of catalog items.

use std::collections::HashSet;

use super::types::CatalogItem;

/// Score for a title equal to the query.
pub const EXACT_TITLE_SCORE: f32 = 10.0;
/// Score for a title containing the query.
pub const PARTIAL_TITLE_SCORE: f32 = 8.0;
/// Score every item gets for an empty query.
pub const EMPTY_QUERY_SCORE: f32 = 1.0;
/// Score per matching tag or title term.
pub const TERM_MATCH_SCORE: f32 = 1.0;

/// Score `item` against `query`.
///
/// Rules, first applicable wins:
///
/// 1. empty query: [`EMPTY_QUERY_SCORE`]
/// 2. title equals query (ignoring case): [`EXACT_TITLE_SCORE`]
/// 3. title contains query (ignoring case): [`PARTIAL_TITLE_SCORE`]
/// 4. one point per tag text and per title word found among the query words
///
/// Term comparisons in rule 4 ignore case and word order.
pub fn score(item: &CatalogItem, query: &str) -> f32 {
    if query.is_empty() {
        return EMPTY_QUERY_SCORE;
    }

    let title = item.title.to_lowercase();
    let query = query.to_lowercase();

    if title == query {
        return EXACT_TITLE_SCORE;
    }
    if title.contains(&query) {
        return PARTIAL_TITLE_SCORE;
    }

    let terms: HashSet<&str> = split_terms(&query).collect();

    let tag_hits = item
        .tags
        .iter()
        .filter(|tag| terms.contains(tag.text.to_lowercase().as_str()))
        .count();
    let title_terms: HashSet<&str> = split_terms(&title).collect();
    let title_hits = title_terms.intersection(&terms).count();

    (tag_hits + title_hits) as f32 * TERM_MATCH_SCORE
}

/// Space-delimited words, empty pieces dropped.
pub(crate) fn split_terms(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::fixtures::item;
    use crate::catalog::types::Tag;
    use chrono::Utc;

    fn tagged(title: &str, tags: &[&str]) -> CatalogItem {
        let mut it = item("slug", title, "Rock", Utc::now());
        it.tags = tags
            .iter()
            .map(|t| Tag {
                slug: t.to_string(),
                text: t.to_string(),
            })
            .collect();
        it
    }

    #[test]
    fn test_exact_title_match() {
        let it = tagged("Plaster Wall", &[]);
        assert_eq!(score(&it, "Plaster Wall"), 10.0);
        assert_eq!(score(&it, "plaster wall"), 10.0);
    }

    #[test]
    fn test_partial_title_match() {
        let it = tagged("Plaster Wall", &[]);
        assert_eq!(score(&it, "aster"), 8.0);
        assert_eq!(score(&it, "WALL"), 8.0);
    }

    #[test]
    fn test_empty_query_scores_one() {
        assert_eq!(score(&tagged("Anything", &[]), ""), 1.0);
    }

    #[test]
    fn test_term_matches_count_tags_and_title_words() {
        let it = tagged("Wall Stone", &["grey", "rough"]);
        assert_eq!(score(&it, "grey stone brick"), 2.0);
        assert_eq!(score(&it, "rough grey wall"), 3.0);
        assert_eq!(score(&it, "brick"), 0.0);
    }

    #[test]
    fn test_repeated_title_word_counts_once() {
        let it = tagged("Stone Stone Wall", &[]);
        assert_eq!(score(&it, "stone brick"), 1.0);
    }

    #[test]
    fn test_term_order_does_not_matter() {
        let it = tagged("Wall Stone Old", &["mossy"]);
        assert_eq!(
            score(&it, "mossy old stone"),
            score(&it, "stone mossy old")
        );
    }

    #[test]
    fn test_title_scores_ten_against_itself() {
        for title in ["Amethyst", "Fabric 202", "Wood Fine 6"] {
            let it = tagged(title, &["x"]);
            assert_eq!(score(&it, &it.title), EXACT_TITLE_SCORE);
        }
    }
}
