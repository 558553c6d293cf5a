//! Query state, matching, scoring, sorting and pagination.
//!
//! This module provides the stages of the directory pipeline:
//! - Query state and its transitions
//! - Free-text term extraction and field matching (exact and fuzzy prefix)
//! - Predicate filtering (categories, languages, flags, location)
//! - Weighted relevance scoring
//! - Sorting by the effective sort key
//! - Page slicing

mod filter;
mod paginate;
mod scoring;
mod sort;
mod state;
mod terms;
mod text_match;

// Re-export public types
pub use filter::RecordFilter;
pub use paginate::{effective_page_size, page_range, paginate, total_pages, DEFAULT_PAGE_SIZE};
pub use scoring::{score_record, Relevance, SearchField, SearchableFields};
pub use sort::sort_entries;
pub use state::{EffectiveSort, QueryState, SortDirection, SortKey};
pub use terms::search_terms;
pub use text_match::{match_field, FieldMatch, MIN_PREFIX_CHARS};
