//! Directory query state and its transitions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::paginate::DEFAULT_PAGE_SIZE;
use super::terms::search_terms;

/// Field a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    #[serde(alias = "wait_time_days")]
    WaitTimeDays,
    Location,
    #[serde(alias = "created_at")]
    CreatedAt,
    #[serde(alias = "_searchScore")]
    RelevanceScore,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::WaitTimeDays => "waitTimeDays",
            Self::Location => "location",
            Self::CreatedAt => "createdAt",
            Self::RelevanceScore => "relevanceScore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The sort key and direction a query run actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Everything the presentation layer controls about one directory view.
///
/// The value is immutable by convention: every transition returns a new
/// state, and every transition except [`QueryState::with_page`] resets the
/// page number to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryState {
    pub category_filter: BTreeSet<String>,
    pub language_filter: BTreeSet<String>,
    pub emergency_only: bool,
    pub weekend_only: bool,
    pub location_query: String,
    pub free_text_query: String,
    /// Explicitly selected sort key; kept while a free-text query overrides it.
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// 1-indexed page number.
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            category_filter: BTreeSet::new(),
            language_filter: BTreeSet::new(),
            emergency_only: false,
            weekend_only: false,
            location_query: String::new(),
            free_text_query: String::new(),
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    /// Returns true when the free-text query contains at least one term.
    pub fn is_searching(&self) -> bool {
        !search_terms(&self.free_text_query).is_empty()
    }

    /// The sort applied to results.
    ///
    /// An active free-text query forces relevance, descending, regardless of
    /// the explicit selection.
    pub fn effective_sort(&self) -> EffectiveSort {
        if self.is_searching() {
            EffectiveSort {
                key: SortKey::RelevanceScore,
                direction: SortDirection::Desc,
            }
        } else {
            EffectiveSort {
                key: self.sort_key,
                direction: self.sort_direction,
            }
        }
    }

    #[must_use]
    pub fn with_search_query(&self, query: impl Into<String>) -> Self {
        Self {
            free_text_query: query.into(),
            ..self.first_page()
        }
    }

    #[must_use]
    pub fn with_location_query(&self, query: impl Into<String>) -> Self {
        Self {
            location_query: query.into(),
            ..self.first_page()
        }
    }

    /// Adds the category when absent, removes it when present.
    #[must_use]
    pub fn toggle_category(&self, category: &str) -> Self {
        let mut next = self.first_page();
        toggle(&mut next.category_filter, category);
        next
    }

    /// Adds the language when absent, removes it when present.
    #[must_use]
    pub fn toggle_language(&self, language: &str) -> Self {
        let mut next = self.first_page();
        toggle(&mut next.language_filter, language);
        next
    }

    #[must_use]
    pub fn with_emergency_only(&self, enabled: bool) -> Self {
        Self {
            emergency_only: enabled,
            ..self.first_page()
        }
    }

    #[must_use]
    pub fn with_weekend_only(&self, enabled: bool) -> Self {
        Self {
            weekend_only: enabled,
            ..self.first_page()
        }
    }

    /// Selects a sort field.
    ///
    /// Selecting the current field flips the direction; selecting another
    /// field sorts by it ascending.
    #[must_use]
    pub fn with_sort(&self, key: SortKey) -> Self {
        let sort_direction = if key == self.sort_key {
            self.sort_direction.flipped()
        } else {
            SortDirection::Asc
        };
        Self {
            sort_key: key,
            sort_direction,
            ..self.first_page()
        }
    }

    #[must_use]
    pub fn with_page_size(&self, page_size: usize) -> Self {
        Self {
            page_size,
            ..self.first_page()
        }
    }

    /// Moves to another page without touching anything else.
    #[must_use]
    pub fn with_page(&self, page_number: usize) -> Self {
        Self {
            page_number,
            ..self.clone()
        }
    }

    /// Clears query, filters and flags and restores name ascending.
    ///
    /// The page size is kept.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            page_size: self.page_size,
            ..Self::default()
        }
    }

    fn first_page(&self) -> Self {
        Self {
            page_number: 1,
            ..self.clone()
        }
    }
}

fn toggle(selection: &mut BTreeSet<String>, value: &str) {
    if !selection.remove(value) {
        selection.insert(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_sorts_by_name_on_first_page() {
        let state = QueryState::default();
        assert_eq!(state.page_number, 1);
        assert_eq!(state.page_size, 10);
        assert_eq!(
            state.effective_sort(),
            EffectiveSort {
                key: SortKey::Name,
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn search_query_forces_relevance_and_keeps_selection() {
        let state = QueryState::default()
            .with_sort(SortKey::WaitTimeDays)
            .with_search_query("vodoinstalater");
        assert_eq!(state.sort_key, SortKey::WaitTimeDays);
        assert_eq!(
            state.effective_sort(),
            EffectiveSort {
                key: SortKey::RelevanceScore,
                direction: SortDirection::Desc
            }
        );

        let cleared = state.with_search_query("");
        assert_eq!(
            cleared.effective_sort(),
            EffectiveSort {
                key: SortKey::WaitTimeDays,
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn whitespace_query_is_not_a_search() {
        let state = QueryState::default().with_search_query("   ");
        assert!(!state.is_searching());
        assert_eq!(state.effective_sort().key, SortKey::Name);
    }

    #[test]
    fn selecting_current_sort_flips_direction() {
        let state = QueryState::default().with_sort(SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Desc);
        let state = state.with_sort(SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Asc);
        let state = state.with_sort(SortKey::Name).with_sort(SortKey::CreatedAt);
        assert_eq!(state.sort_key, SortKey::CreatedAt);
        assert_eq!(state.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn transitions_reset_page_but_paging_does_not() {
        let paged = QueryState::default().with_page(4);
        assert_eq!(paged.page_number, 4);

        assert_eq!(paged.with_search_query("ivan").page_number, 1);
        assert_eq!(paged.with_location_query("split").page_number, 1);
        assert_eq!(paged.toggle_category("Bravarija").page_number, 1);
        assert_eq!(paged.toggle_language("engleski").page_number, 1);
        assert_eq!(paged.with_emergency_only(true).page_number, 1);
        assert_eq!(paged.with_weekend_only(true).page_number, 1);
        assert_eq!(paged.with_sort(SortKey::Location).page_number, 1);
        assert_eq!(paged.with_page_size(20).page_number, 1);
        assert_eq!(paged.with_page(2).page_number, 2);
    }

    #[test]
    fn toggles_add_then_remove() {
        let state = QueryState::default().toggle_category("Kuhinja");
        assert!(state.category_filter.contains("Kuhinja"));
        let state = state.toggle_category("Kuhinja");
        assert!(state.category_filter.is_empty());
    }

    #[test]
    fn transitions_do_not_mutate_the_source_state() {
        let original = QueryState::default();
        let _ = original.toggle_language("hrvatski").with_emergency_only(true);
        assert_eq!(original, QueryState::default());
    }

    #[test]
    fn reset_keeps_page_size_only() {
        let state = QueryState::default()
            .with_page_size(25)
            .with_search_query("ivan")
            .toggle_category("Kuhinja")
            .with_weekend_only(true)
            .with_sort(SortKey::Location)
            .with_page(3)
            .reset();
        assert_eq!(
            state,
            QueryState {
                page_size: 25,
                ..QueryState::default()
            }
        );
    }

    #[test]
    fn deserializes_partial_camel_case_state() {
        let state: QueryState = serde_json::from_str(
            r#"{
                "freeTextQuery": "ivan",
                "categoryFilter": ["Vodoinstalacije"],
                "sortKey": "wait_time_days",
                "sortDirection": "desc"
            }"#,
        )
        .expect("parse state");
        assert_eq!(state.free_text_query, "ivan");
        assert!(state.category_filter.contains("Vodoinstalacije"));
        assert_eq!(state.sort_key, SortKey::WaitTimeDays);
        assert_eq!(state.sort_direction, SortDirection::Desc);
        assert_eq!(state.page_number, 1);
        assert_eq!(state.page_size, 10);
    }
}
