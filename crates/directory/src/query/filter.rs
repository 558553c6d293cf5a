//! Predicate filtering over records.

use crate::types::ProfessionalRecord;

use super::state::QueryState;

/// The non-text predicates of a query, compiled once per run.
///
/// Predicates are conjunctive; within categories and languages any selected
/// value is enough. The free-text predicate lives in the scorer.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    categories: Vec<String>,
    languages: Vec<String>,
    emergency_only: bool,
    weekend_only: bool,
    location: Option<String>,
}

impl RecordFilter {
    pub fn compile(state: &QueryState) -> Self {
        Self {
            categories: state.category_filter.iter().cloned().collect(),
            languages: state.language_filter.iter().cloned().collect(),
            emergency_only: state.emergency_only,
            weekend_only: state.weekend_only,
            location: (!state.location_query.is_empty())
                .then(|| state.location_query.to_lowercase()),
        }
    }

    /// Returns true when no predicate restricts the result.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.languages.is_empty()
            && !self.emergency_only
            && !self.weekend_only
            && self.location.is_none()
    }

    pub fn matches(&self, record: &ProfessionalRecord) -> bool {
        if self.emergency_only && !record.emergency_available {
            return false;
        }
        if self.weekend_only && !record.weekend_evening {
            return false;
        }
        if !intersects(&record.categories, &self.categories) {
            return false;
        }
        if !intersects(&record.languages, &self.languages) {
            return false;
        }
        match self.location.as_deref() {
            Some(needle) => contains_folded(&record.location, needle)
                || contains_folded(&record.service_area, needle),
            None => true,
        }
    }
}

/// An empty selection passes everything.
fn intersects(values: &[String], selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|wanted| values.contains(wanted))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}
