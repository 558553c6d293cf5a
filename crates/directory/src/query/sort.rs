//! Result ordering.

use std::cmp::Ordering;

use crate::types::{DirectoryEntry, ProfessionalRecord};

use super::state::{EffectiveSort, SortDirection, SortKey};

/// Sorts entries in place by the effective sort.
///
/// Strings compare case-insensitively and missing values sort as the
/// smallest value of their type. Equal relevance scores fall back to name
/// ascending; other keys keep snapshot order for ties (the sort is stable).
pub fn sort_entries(entries: &mut [DirectoryEntry], sort: EffectiveSort) {
    entries.sort_by(|a, b| {
        let primary = compare_key(a, b, sort.key);
        let primary = match sort.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        if primary == Ordering::Equal && sort.key == SortKey::RelevanceScore {
            return compare_folded(&a.record.name, &b.record.name);
        }
        primary
    });
}

fn compare_key(a: &DirectoryEntry, b: &DirectoryEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_folded(&a.record.name, &b.record.name),
        SortKey::Location => compare_folded(&a.record.location, &b.record.location),
        SortKey::WaitTimeDays => wait_days(&a.record).cmp(&wait_days(&b.record)),
        SortKey::CreatedAt => a.record.created_at.cmp(&b.record.created_at),
        SortKey::RelevanceScore => a
            .search_score
            .unwrap_or(0)
            .cmp(&b.search_score.unwrap_or(0)),
    }
}

fn wait_days(record: &ProfessionalRecord) -> u32 {
    record.wait_time_days.unwrap_or(0)
}

fn compare_folded(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
