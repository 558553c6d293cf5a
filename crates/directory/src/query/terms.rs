//! Free-text term extraction.

/// Splits a raw free-text query into lowercased, whitespace-delimited terms.
///
/// An empty or whitespace-only query yields no terms.
pub fn search_terms(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
