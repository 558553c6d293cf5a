//! Professional directory search and ranking.
//!
//! This crate provides the core directory functionality:
//! - Strict professional records built from loosely typed backend rows
//! - The fixed two-level service category taxonomy
//! - Query state, filtering, relevance scoring, sorting and pagination
//! - Snapshot loading from pluggable data sources
//! - Profile page helpers (bio sanitizing, page metadata)

pub mod error;
pub mod profile;
pub mod query;
pub mod search;
pub mod source;
pub mod taxonomy;
pub mod types;

// Re-export main types
pub use error::{DirectoryError, Result};
pub use profile::{ProfileMetadata, ProfileView};
pub use query::{EffectiveSort, QueryState, SortDirection, SortKey};
pub use search::{apply_query, rank_entries, DirectoryEngine, Facets, Snapshot};
pub use source::{JsonFileSource, ProfessionalSource, RestSource, SharedSource, StaticSource};
pub use taxonomy::CategoryTaxonomy;
pub use types::{DirectoryEntry, ProfessionalRecord, ProfessionalRow, QueryPage, SnapshotStatus};
