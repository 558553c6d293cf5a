//! The query pipeline: filter, score, sort, paginate.

use std::sync::Arc;
use std::time::Instant;

use crate::profile::ProfileView;
use crate::query::{
    effective_page_size, paginate, score_record, search_terms, sort_entries, total_pages,
    QueryState, RecordFilter,
};
use crate::taxonomy::CategoryTaxonomy;
use crate::types::{DirectoryEntry, QueryPage};

use super::facets::Facets;
use super::snapshot::Snapshot;

/// Filters, scores and sorts the whole snapshot for a state.
///
/// Entries carry a score only while the state has a free-text query.
pub fn rank_entries(
    snapshot: &Snapshot,
    taxonomy: &CategoryTaxonomy,
    state: &QueryState,
) -> Vec<DirectoryEntry> {
    let filter = RecordFilter::compile(state);
    let terms = search_terms(&state.free_text_query);
    let searching = !terms.is_empty();

    let mut entries: Vec<DirectoryEntry> = snapshot
        .records()
        .iter()
        .filter(|record| filter.matches(record))
        .filter_map(|record| {
            if !searching {
                return Some(DirectoryEntry {
                    record: Arc::clone(record),
                    search_score: None,
                });
            }
            let relevance = score_record(record, taxonomy, &terms);
            relevance.matched.then(|| DirectoryEntry {
                record: Arc::clone(record),
                search_score: Some(relevance.score),
            })
        })
        .collect();

    sort_entries(&mut entries, state.effective_sort());
    entries
}

/// Runs the full pipeline and returns the requested page.
///
/// Pure: the same snapshot, taxonomy and state always give the same page.
pub fn apply_query(
    snapshot: &Snapshot,
    taxonomy: &CategoryTaxonomy,
    state: &QueryState,
) -> QueryPage {
    let started = Instant::now();
    let filtered = !RecordFilter::compile(state).is_empty();
    let entries = rank_entries(snapshot, taxonomy, state);
    let total_count = entries.len();
    let page_size = effective_page_size(state.page_size);
    let items = paginate(entries, state.page_number, page_size);

    log::debug!(
        "directory query records={} filtered={} matched={} page={} returned={} elapsed_us={}",
        snapshot.len(),
        filtered,
        total_count,
        state.page_number,
        items.len(),
        started.elapsed().as_micros(),
    );

    QueryPage {
        items,
        total_count,
        total_pages: total_pages(total_count, page_size),
        page: state.page_number,
        page_size,
        effective_sort: state.effective_sort(),
    }
}

/// A snapshot paired with the taxonomy used to search it.
#[derive(Debug, Clone)]
pub struct DirectoryEngine {
    snapshot: Arc<Snapshot>,
    taxonomy: Arc<CategoryTaxonomy>,
}

impl DirectoryEngine {
    pub fn new(snapshot: Arc<Snapshot>, taxonomy: Arc<CategoryTaxonomy>) -> Self {
        Self { snapshot, taxonomy }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    pub fn apply_query(&self, state: &QueryState) -> QueryPage {
        apply_query(&self.snapshot, &self.taxonomy, state)
    }

    pub fn facets(&self) -> Facets {
        Facets::collect(&self.snapshot, &self.taxonomy)
    }

    /// Profile page data for one record, `None` for an unknown id.
    pub fn profile(&self, id: &str) -> Option<ProfileView> {
        self.snapshot
            .get(id)
            .map(|record| ProfileView::build(Arc::clone(record), &self.taxonomy))
    }
}
