//! Turn the text of one marketplace export into listable records.

use serde_json::Value;

use crate::models::Record;

/// Records retained from one source, with counts for reporting.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    pub records: Vec<Record>,
    /// Entries in the source before filtering.
    pub total: usize,
    /// Entries dropped: non-objects or non-positive initial price.
    pub discarded: usize,
}

/// Parse a JSON export and keep only listable records.
pub fn parse_source(json: &str) -> Result<ParsedSource, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    Ok(filter_listings(value))
}

/// Keep the listable records of an already-parsed export.
///
/// A top-level value that is not an array is treated as a single entry.
pub fn filter_listings(value: Value) -> ParsedSource {
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    let total = items.len();

    let records: Vec<Record> = items
        .into_iter()
        // Structs also deserialize from sequences; only objects are listings.
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value::<Record>(item).ok())
        .filter(Record::is_listable)
        .collect();

    ParsedSource {
        discarded: total - records.len(),
        total,
        records,
    }
}
