//! # Marketplace Checker Core
//!
//! Pure listing logic for Marketplace Checker: the record model, price and
//! rating normalization, source parsing, search ranking, and pagination.
//!
//! This crate does no filesystem, network, or async work. Callers read the
//! JSON exports themselves and hand the text to [`parse::parse_source`].
//!
//! ```
//! use marketplace_core::parse::parse_source;
//! use marketplace_core::search::{search, SearchRequest};
//!
//! let parsed = parse_source(r#"[
//!     {"title": "Bluetooth Speaker", "initial_price": "₱1,299", "final_price": 999, "rating": 4.5},
//!     {"title": "Headphones", "initial_price": 0}
//! ]"#).unwrap();
//! assert_eq!(parsed.records.len(), 1);
//!
//! let found = search(&parsed.records, &SearchRequest::new("speaker"));
//! assert_eq!(found.best_deal.unwrap().title, "Bluetooth Speaker");
//! ```

pub mod models;
pub mod normalize;
pub mod paginate;
pub mod parse;
pub mod search;
