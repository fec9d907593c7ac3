//! The aggregated, read-only product catalog.
//!
//! Built once at startup from every configured source and then shared
//! immutably (by reference in the CLI, behind an `Arc` in the server).
//! Sources are appended in configured order and never deduplicated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use marketplace_core::models::Record;
use marketplace_core::search::{search, SearchRequest, SearchResults};

use crate::loader::{load_source, LoadError};

/// Load outcome for one configured source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: SourceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Loaded {
        total: usize,
        retained: usize,
        discarded: usize,
    },
    NotFound,
    Malformed {
        message: String,
    },
    Unreadable {
        message: String,
    },
}

impl SourceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SourceStatus::Loaded { .. } => "OK",
            SourceStatus::NotFound => "NOT FOUND",
            SourceStatus::Malformed { .. } => "MALFORMED",
            SourceStatus::Unreadable { .. } => "UNREADABLE",
        }
    }

    pub fn retained(&self) -> usize {
        match self {
            SourceStatus::Loaded { retained, .. } => *retained,
            _ => 0,
        }
    }
}

impl From<&LoadError> for SourceStatus {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::NotFound { .. } => SourceStatus::NotFound,
            LoadError::ParseError { source, .. } => SourceStatus::Malformed {
                message: source.to_string(),
            },
            LoadError::Io { source, .. } => SourceStatus::Unreadable {
                message: source.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Record>,
    reports: Vec<SourceReport>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Load every source in order, skipping the ones that fail.
    pub fn load(paths: &[PathBuf]) -> Self {
        let mut records = Vec::new();
        let mut reports = Vec::with_capacity(paths.len());

        for path in paths {
            match load_source(path) {
                Ok(loaded) => {
                    reports.push(SourceReport {
                        path: path.clone(),
                        status: SourceStatus::Loaded {
                            total: loaded.total,
                            retained: loaded.records.len(),
                            discarded: loaded.discarded,
                        },
                    });
                    records.extend(loaded.records);
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    reports.push(SourceReport {
                        path: path.clone(),
                        status: SourceStatus::from(&e),
                    });
                }
            }
        }

        tracing::info!(
            products = records.len(),
            sources = paths.len(),
            "aggregated catalog"
        );

        Self {
            records,
            reports,
            loaded_at: Utc::now(),
        }
    }

    /// Catalog over records already in memory, with no source reports.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            reports: Vec::new(),
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reports(&self) -> &[SourceReport] {
        &self.reports
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn search(&self, term: &str, placeholder_image: &str) -> SearchResults {
        search(
            &self.records,
            &SearchRequest {
                term,
                placeholder_image,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_same_source_twice_doubles() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "lazada.json",
            r#"[{"title": "A", "initial_price": 1}, {"title": "B", "initial_price": 2}]"#,
        );
        let once = Catalog::load(std::slice::from_ref(&path));
        let twice = Catalog::load(&[path.clone(), path]);
        assert_eq!(once.len(), 2);
        assert_eq!(twice.len(), 4);
    }

    #[test]
    fn test_mixed_sources_aggregate_valid_only() {
        let tmp = TempDir::new().unwrap();
        let first = write(
            tmp.path(),
            "first.json",
            r#"[{"title": "A", "initial_price": 1}, {"title": "B", "initial_price": "₱2"}]"#,
        );
        let broken = write(tmp.path(), "broken.json", "{not json");
        let third = write(
            tmp.path(),
            "third.json",
            r#"[
                {"title": "C", "initial_price": 3},
                {"title": "D", "initial_price": 4},
                {"title": "E"},
                {"title": "F", "initial_price": "5.50"}
            ]"#,
        );
        let missing = tmp.path().join("missing.json");

        let catalog = Catalog::load(&[first.clone(), broken, third, missing]);
        assert_eq!(catalog.len(), 5);

        let titles: Vec<String> = catalog.records().iter().map(|r| r.title_text()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D", "F"]);

        let labels: Vec<&str> = catalog.reports().iter().map(|r| r.status.label()).collect();
        assert_eq!(labels, vec!["OK", "MALFORMED", "OK", "NOT FOUND"]);
        assert_eq!(
            catalog.reports()[2].status,
            SourceStatus::Loaded {
                total: 4,
                retained: 3,
                discarded: 1
            }
        );
        assert_eq!(catalog.reports()[0].path, first);
    }

    #[test]
    fn test_all_sources_missing() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::load(&[tmp.path().join("a.json"), tmp.path().join("b.json")]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.reports().len(), 2);
        assert!(catalog.reports().iter().all(|r| r.status.retained() == 0));
    }

    #[test]
    fn test_search_delegates() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            tmp.path(),
            "shop.json",
            r#"[
                {"title": "Bluetooth Speaker", "initial_price": 10, "rating": 4.1},
                {"title": "Speakerphone", "initial_price": 10, "rating": 4.9},
                {"title": "Headphones", "initial_price": 10, "rating": 5}
            ]"#,
        );
        let catalog = Catalog::load(&[path]);
        let found = catalog.search("SPEAKER", "/none.png");
        assert_eq!(found.len(), 2);
        assert_eq!(found.best_deal.unwrap().title, "Speakerphone");
    }

    #[test]
    fn test_from_records_keeps_order() {
        let records: Vec<Record> = ["Lamp A", "Lamp B"]
            .iter()
            .map(|t| Record {
                title: Some(serde_json::json!(t)),
                initial_price: Some(serde_json::json!(5)),
                ..Record::default()
            })
            .collect();
        let catalog = Catalog::from_records(records);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.reports().is_empty());
        assert_eq!(catalog.search("lamp", "/none.png").results[0].title, "Lamp A");
    }

    #[test]
    fn test_report_serializes_with_status_tag() {
        let report = SourceReport {
            path: PathBuf::from("a.json"),
            status: SourceStatus::NotFound,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "not_found");
        assert_eq!(value["path"], "a.json");
    }
}
