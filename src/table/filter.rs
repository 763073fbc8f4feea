//! Row filtering: free-text search plus one auxiliary equality filter.

use super::row::{FieldValue, TableRow};

/// Normalised search term; `None` means "match everything"
pub fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// True when any of `keys` holds a non-null value containing `needle`.
/// `needle` must already be lowercase.
pub fn matches_search<R: TableRow>(row: &R, keys: &[&str], needle: &str) -> bool {
    keys.iter().any(|key| {
        let value = row.field(key);
        !value.is_null() && value.to_text().to_lowercase().contains(needle)
    })
}

/// True when `row[field] == value`
pub fn matches_aux<R: TableRow>(row: &R, field: &str, value: &FieldValue) -> bool {
    &row.field(field) == value
}
