//! # Marketplace Checker
//!
//! Compare product listings scraped from several e-commerce marketplaces
//! and find the best deal for a keyword.
//!
//! Marketplace exports are static JSON files. They are loaded once at
//! startup, filtered down to listings with a positive initial price, and
//! merged into a read-only [`catalog::Catalog`]. Searches rank matching
//! listings by rating (highest first), then final price (lowest first).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ JSON exports │──▶│   Loader    │──▶│   Catalog    │
//! │ (per source) │   │ parse+filter│   │ (read-only)  │
//! └──────────────┘   └─────────────┘   └──────┬───────┘
//!                                             │
//!                        ┌────────────────────┤
//!                        ▼                    ▼
//!                   ┌──────────┐        ┌──────────┐
//!                   │   CLI    │        │   HTTP   │
//!                   │  (mkt)   │        │  (web)   │
//!                   └──────────┘        └──────────┘
//! ```
//!
//! The pure pieces (record model, normalizer, ranking, pagination) live in
//! the `marketplace-core` crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | Tracing subscriber setup |
//! | [`loader`] | Reading exports from disk |
//! | [`catalog`] | Aggregated catalog and per-source reports |
//! | [`search`] | Console search output |
//! | [`sources`] | Source status listing |
//! | [`server`] | Web UI and JSON API |

pub mod catalog;
pub mod config;
pub mod loader;
pub mod logging;
pub mod search;
pub mod server;
pub mod sources;
