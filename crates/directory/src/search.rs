//! Search over a loaded directory snapshot.
//!
//! This module provides:
//! - The immutable [`Snapshot`] of professional records
//! - The query pipeline (filter, score, sort, paginate)
//! - Facet extraction for filter controls

mod engine;
mod facets;
mod snapshot;

// Re-export main types
pub use engine::{apply_query, rank_entries, DirectoryEngine};
pub use facets::Facets;
pub use snapshot::Snapshot;
