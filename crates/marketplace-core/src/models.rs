//! Core data models for marketplace listings.
//!
//! A [`Record`] is one scraped product listing as it appears in a JSON
//! export. A [`SearchResult`] is the display-ready projection returned by
//! the search engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{display_value, normalize_number, NOT_AVAILABLE};

/// Image shown when a listing has no usable image URLs.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/300x300/f0f0f0/666666?text=No+Images";

/// One product listing from a marketplace export.
///
/// Every field is optional and loosely typed: exports disagree on whether
/// prices are numbers or strings, and any field may be missing. A JSON
/// `null` deserializes the same as an absent key. Unrecognized keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub initial_price: Option<Value>,
    #[serde(default)]
    pub final_price: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub seller_name: Option<Value>,
    #[serde(default)]
    pub url: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
}

impl Record {
    /// Title as searchable text. Non-string titles use their JSON text;
    /// a missing title is empty.
    pub fn title_text(&self) -> String {
        match &self.title {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Normalized initial price; missing or unparsable is `0.0`.
    pub fn initial_price_value(&self) -> f64 {
        normalize_number(self.initial_price.as_ref(), 0.0)
    }

    /// Normalized final price; missing or unparsable is `+inf`.
    pub fn final_price_value(&self) -> f64 {
        normalize_number(self.final_price.as_ref(), f64::INFINITY)
    }

    /// Normalized rating; missing or unparsable is `0.0`.
    pub fn rating_value(&self) -> f64 {
        normalize_number(self.rating.as_ref(), 0.0)
    }

    /// Whether the listing belongs in the catalog (positive initial price).
    pub fn is_listable(&self) -> bool {
        self.initial_price_value() > 0.0
    }

    /// Product link if it is an absolute http(s) URL.
    pub fn product_url(&self) -> Option<String> {
        match &self.url {
            Some(Value::String(s)) => {
                let url = s.trim();
                if url.starts_with("http://") || url.starts_with("https://") {
                    Some(url.to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Non-empty image URLs. Accepts a list of strings or a single string.
    pub fn image_urls(&self) -> Vec<String> {
        match &self.image {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        }
    }
}

/// Display-ready projection of a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub initial_price: String,
    pub final_price: String,
    pub rating: String,
    pub seller_name: String,
    pub product_url: String,
    /// Never empty; falls back to a placeholder image.
    pub image_urls: Vec<String>,
}

impl SearchResult {
    pub fn from_record(record: &Record, placeholder_image: &str) -> Self {
        let mut image_urls = record.image_urls();
        if image_urls.is_empty() {
            image_urls.push(placeholder_image.to_string());
        }

        Self {
            title: display_value(record.title.as_ref()),
            initial_price: display_value(record.initial_price.as_ref()),
            final_price: display_value(record.final_price.as_ref()),
            rating: display_value(record.rating.as_ref()),
            seller_name: display_value(record.seller_name.as_ref()),
            product_url: record
                .product_url()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            image_urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_zero_price_not_listable() {
        assert!(!record(json!({"initial_price": "0"})).is_listable());
        assert!(!record(json!({"initial_price": 0})).is_listable());
        assert!(!record(json!({"initial_price": -3.5})).is_listable());
    }

    #[test]
    fn test_small_price_listable() {
        assert!(record(json!({"initial_price": "0.01"})).is_listable());
        assert!(record(json!({"initial_price": "₱1,234.50"})).is_listable());
    }

    #[test]
    fn test_missing_price_not_listable() {
        assert!(!record(json!({"title": "Speaker"})).is_listable());
        assert!(!record(json!({"initial_price": null})).is_listable());
    }

    #[test]
    fn test_title_text_coercion() {
        assert_eq!(record(json!({"title": "Speaker"})).title_text(), "Speaker");
        assert_eq!(record(json!({"title": 1080})).title_text(), "1080");
        assert_eq!(record(json!({})).title_text(), "");
        assert_eq!(record(json!({"title": null})).title_text(), "");
    }

    #[test]
    fn test_sort_key_defaults() {
        let r = record(json!({}));
        assert_eq!(r.rating_value(), 0.0);
        assert_eq!(r.final_price_value(), f64::INFINITY);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let r = record(json!({"title": "Lamp", "brand": "Acme", "stock": 4}));
        assert_eq!(r.title_text(), "Lamp");
    }

    #[test]
    fn test_product_url_validation() {
        let ok = record(json!({"url": " https://shop.example/p/1 "}));
        assert_eq!(ok.product_url().as_deref(), Some("https://shop.example/p/1"));
        assert!(record(json!({"url": "not a link"})).product_url().is_none());
        assert!(record(json!({"url": 12})).product_url().is_none());
        assert!(record(json!({})).product_url().is_none());
    }

    #[test]
    fn test_image_urls_shapes() {
        let list = record(json!({"image": ["a.jpg", "", 3, "b.jpg"]}));
        assert_eq!(list.image_urls(), vec!["a.jpg", "b.jpg"]);
        let single = record(json!({"image": "c.jpg"}));
        assert_eq!(single.image_urls(), vec!["c.jpg"]);
        assert!(record(json!({"image": []})).image_urls().is_empty());
        assert!(record(json!({"image": {"src": "d.jpg"}})).image_urls().is_empty());
    }

    #[test]
    fn test_projection_defaults() {
        let r = record(json!({"initial_price": 10}));
        let result = SearchResult::from_record(&r, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(result.title, "N/A");
        assert_eq!(result.initial_price, "10");
        assert_eq!(result.final_price, "N/A");
        assert_eq!(result.rating, "N/A");
        assert_eq!(result.seller_name, "N/A");
        assert_eq!(result.product_url, "N/A");
        assert_eq!(result.image_urls, vec![DEFAULT_PLACEHOLDER_IMAGE]);
    }

    #[test]
    fn test_projection_keeps_raw_text() {
        let r = record(json!({
            "title": "Bluetooth Speaker",
            "initial_price": "₱1,299.00",
            "final_price": 999.5,
            "rating": "4.7",
            "seller_name": "AudioHub",
            "url": "https://shop.example/speaker",
            "image": ["https://img.example/1.jpg"]
        }));
        let result = SearchResult::from_record(&r, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(result.initial_price, "₱1,299.00");
        assert_eq!(result.final_price, "999.5");
        assert_eq!(result.rating, "4.7");
        assert_eq!(result.seller_name, "AudioHub");
        assert_eq!(result.image_urls, vec!["https://img.example/1.jpg"]);
    }
}
