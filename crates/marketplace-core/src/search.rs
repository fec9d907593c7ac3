//! Keyword search and best-deal ranking over the catalog.
//!
//! # Ranking
//!
//! 1. Keep records whose title contains the term (case-insensitive).
//! 2. Sort by normalized rating (desc), then normalized final price (asc).
//!    Missing ratings count as `0.0`; missing prices count as `+inf`.
//!    The sort is stable, so ties keep catalog order.
//! 3. Project each record into a [`SearchResult`]. The first one is the
//!    best deal.
//!
//! The catalog filter uses the *initial* price while ranking uses the
//! *final* price, so a listing with a positive initial price and a zero
//! final price stays in the catalog and ranks ahead of its peers.

use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{Record, SearchResult, DEFAULT_PLACEHOLDER_IMAGE};

/// Inputs for a single search.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    /// Raw search term. Surrounding whitespace is trimmed before matching,
    /// so `" speaker"` matches `"Speakerphone"`. Blank means no search.
    pub term: &'a str,
    /// Image used for results without image URLs.
    pub placeholder_image: &'a str,
}

impl<'a> SearchRequest<'a> {
    pub fn new(term: &'a str) -> Self {
        Self {
            term,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE,
        }
    }
}

/// Outcome of a search.
///
/// `term` is `None` when no search was performed, which is distinct from a
/// search with no matches (`term` set, `results` empty).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub term: Option<String>,
    pub best_deal: Option<SearchResult>,
    pub results: Vec<SearchResult>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

/// Sort key for ranking a matched record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DealKey {
    pub rating: f64,
    pub final_price: f64,
}

impl DealKey {
    pub fn of(record: &Record) -> Self {
        Self {
            rating: record.rating_value(),
            final_price: record.final_price_value(),
        }
    }

    /// Better deals order first: higher rating, then lower price.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .rating
            .partial_cmp(&self.rating)
            .unwrap_or(Ordering::Equal)
            .then(
                self.final_price
                    .partial_cmp(&other.final_price)
                    .unwrap_or(Ordering::Equal),
            )
    }
}

/// Whether `record`'s title contains the already lower-cased `needle`.
fn title_matches(record: &Record, needle: &str) -> bool {
    record.title_text().to_lowercase().contains(needle)
}

/// Search `records` and rank the matches.
///
/// This is the function every frontend (CLI, HTTP) delegates to. It never
/// mutates the catalog and holds no state between calls.
pub fn search(records: &[Record], req: &SearchRequest<'_>) -> SearchResults {
    let term = req.term.trim();
    if term.is_empty() {
        return SearchResults::default();
    }

    let needle = term.to_lowercase();

    let mut matches: Vec<(DealKey, &Record)> = records
        .iter()
        .filter(|r| title_matches(r, &needle))
        .map(|r| (DealKey::of(r), r))
        .collect();

    matches.sort_by(|a, b| a.0.rank(&b.0));

    let results: Vec<SearchResult> = matches
        .iter()
        .map(|(_, r)| SearchResult::from_record(r, req.placeholder_image))
        .collect();

    SearchResults {
        term: Some(term.to_string()),
        best_deal: results.first().cloned(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn make_record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    fn priced(title: &str, rating: Value, price: Value) -> Record {
        make_record(json!({
            "title": title,
            "initial_price": 100,
            "rating": rating,
            "final_price": price
        }))
    }

    fn titles(found: &SearchResults) -> Vec<&str> {
        found.results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let records = vec![
            priced("Bluetooth SPEAKER", json!(4.0), json!(10)),
            priced("Speakerphone", json!(3.0), json!(10)),
            priced("Headphones", json!(5.0), json!(10)),
        ];
        let found = search(&records, &SearchRequest::new("speaker"));
        assert_eq!(titles(&found), vec!["Bluetooth SPEAKER", "Speakerphone"]);
    }

    #[test]
    fn test_rating_then_price() {
        let records = vec![
            priced("item a", json!(4.5), json!(20)),
            priced("item b", json!(4.5), json!(10)),
            priced("item c", json!(3.0), json!(5)),
        ];
        let found = search(&records, &SearchRequest::new("item"));
        assert_eq!(titles(&found), vec!["item b", "item a", "item c"]);
        assert_eq!(found.best_deal.as_ref().unwrap().title, "item b");
    }

    #[test]
    fn test_missing_rating_and_price_sort_last() {
        let records = vec![
            make_record(json!({"title": "lamp bare", "initial_price": 1})),
            priced("lamp cheap", json!(null), json!("₱50")),
            priced("lamp rated", json!("2.5"), json!(null)),
            priced("lamp zero", json!("0"), json!(900)),
        ];
        let found = search(&records, &SearchRequest::new("lamp"));
        assert_eq!(
            titles(&found),
            vec!["lamp rated", "lamp cheap", "lamp zero", "lamp bare"]
        );
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let records = vec![
            priced("mug one", json!(4), json!(10)),
            priced("mug two", json!("4.0"), json!("10")),
            priced("mug three", json!(4), json!(10.0)),
        ];
        let found = search(&records, &SearchRequest::new("mug"));
        assert_eq!(titles(&found), vec!["mug one", "mug two", "mug three"]);
    }

    #[test]
    fn test_zero_final_price_ranks_first() {
        let records = vec![
            priced("cable normal", json!(4), json!(99)),
            priced("cable free", json!(4), json!(0)),
        ];
        let found = search(&records, &SearchRequest::new("cable"));
        assert_eq!(titles(&found), vec!["cable free", "cable normal"]);
    }

    #[test]
    fn test_blank_term_is_no_search() {
        let records = vec![priced("anything", json!(5), json!(1))];
        for term in ["", "   "] {
            let found = search(&records, &SearchRequest::new(term));
            assert!(found.term.is_none());
            assert!(found.best_deal.is_none());
            assert!(found.is_empty());
        }
    }

    #[test]
    fn test_no_matches_is_empty_not_absent() {
        let records = vec![priced("Headphones", json!(5), json!(1))];
        let found = search(&records, &SearchRequest::new("toaster"));
        assert_eq!(found.term.as_deref(), Some("toaster"));
        assert!(found.best_deal.is_none());
        assert!(found.is_empty());
    }

    #[test]
    fn test_term_is_trimmed() {
        let records = vec![priced("Bluetooth Speaker", json!(5), json!(1))];
        let found = search(&records, &SearchRequest::new("  speaker "));
        assert_eq!(found.len(), 1);
        assert_eq!(found.term.as_deref(), Some("speaker"));

        let records = vec![priced("Speakerphone", json!(5), json!(1))];
        assert_eq!(search(&records, &SearchRequest::new(" speaker")).len(), 1);
    }

    #[test]
    fn test_untitled_records_never_match() {
        let records = vec![make_record(json!({"initial_price": 5, "seller_name": "speaker shop"}))];
        let found = search(&records, &SearchRequest::new("speaker"));
        assert!(found.is_empty());
    }

    #[test]
    fn test_custom_placeholder() {
        let records = vec![priced("Desk", json!(5), json!(1))];
        let req = SearchRequest {
            term: "desk",
            placeholder_image: "/static/none.png",
        };
        let found = search(&records, &req);
        assert_eq!(found.results[0].image_urls, vec!["/static/none.png"]);
    }

    #[test]
    fn test_deal_key_rank() {
        let better = DealKey { rating: 5.0, final_price: 100.0 };
        let worse = DealKey { rating: 4.0, final_price: 1.0 };
        assert_eq!(better.rank(&worse), Ordering::Less);
        let cheap = DealKey { rating: 4.0, final_price: 1.0 };
        let pricey = DealKey { rating: 4.0, final_price: f64::INFINITY };
        assert_eq!(cheap.rank(&pricey), Ordering::Less);
        assert_eq!(pricey.rank(&pricey), Ordering::Equal);
    }
}
