//! Filter options derived from a snapshot.

use std::collections::HashSet;

use serde::Serialize;

use crate::taxonomy::CategoryTaxonomy;

use super::snapshot::Snapshot;

/// Values a filter UI can offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    /// Distinct record categories, first-seen order.
    pub categories: Vec<String>,
    /// Distinct record languages, first-seen order.
    pub languages: Vec<String>,
    /// Taxonomy top-level names without ordinal prefixes.
    pub top_categories: Vec<String>,
}

impl Facets {
    pub fn collect(snapshot: &Snapshot, taxonomy: &CategoryTaxonomy) -> Self {
        let records = snapshot.records();
        Self {
            categories: distinct(records.iter().flat_map(|record| record.categories.iter())),
            languages: distinct(records.iter().flat_map(|record| record.languages.iter())),
            top_categories: taxonomy.top_level_names(),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| !value.is_empty() && seen.insert(value.as_str()))
        .cloned()
        .collect()
}
