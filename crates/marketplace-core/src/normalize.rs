//! Numeric coercion for scraped price and rating fields.
//!
//! Marketplace exports carry prices as numbers, as strings with currency
//! symbols and thousands separators (`"₱1,234.50"`), or not at all. Every
//! place that reads a numeric field goes through [`normalize_number`] so the
//! listing filter and the ranking sort agree on what a value means.

use serde_json::Value;

/// Marker rendered in place of a missing display field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Coerce a raw JSON field into a number, falling back to `default`.
///
/// - numbers convert directly
/// - strings keep only ASCII digits and `.` before parsing
/// - booleans map to `1.0` / `0.0`
/// - absent, `null`, arrays, and objects yield `default`
pub fn normalize_number(value: Option<&Value>, default: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => parse_numeric_text(s).unwrap_or(default),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => default,
    }
}

/// Parse the digits and decimal points of `text` as a float.
///
/// Returns `None` when nothing numeric is left or the remainder is not a
/// valid float (e.g. `"1.2.3"`).
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

/// Render a raw field for display.
///
/// Strings are shown verbatim, other JSON values use their JSON text, and a
/// missing field becomes [`NOT_AVAILABLE`].
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
