//! Immutable record snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::source::ProfessionalSource;
use crate::types::{ProfessionalRecord, ProfessionalRow, SnapshotStatus};

/// The complete professional list as of one successful fetch.
///
/// Record order is the order the backend returned them in; sorting by a key
/// with ties keeps that order.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Vec<Arc<ProfessionalRecord>>,
    by_id: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
    source: String,
}

impl Snapshot {
    /// Builds a snapshot from backend rows.
    ///
    /// Rows are defaulted into strict records. A row whose non-empty id was
    /// already seen is dropped; the first occurrence wins.
    pub fn from_rows(rows: Vec<ProfessionalRow>, source: impl Into<String>) -> Self {
        Self::from_records(rows.into_iter().map(ProfessionalRecord::from_row), source)
    }

    pub fn from_records<I>(records: I, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = ProfessionalRecord>,
    {
        let source = source.into();
        let mut kept = Vec::new();
        let mut by_id = HashMap::new();
        let mut duplicates = 0usize;

        for record in records {
            if !record.id.is_empty() {
                if by_id.contains_key(&record.id) {
                    duplicates += 1;
                    log::warn!("dropping duplicate professional id={} source={}", record.id, source);
                    continue;
                }
                by_id.insert(record.id.clone(), kept.len());
            }
            kept.push(Arc::new(record));
        }

        if duplicates > 0 {
            log::warn!("snapshot source={} dropped {} duplicate rows", source, duplicates);
        }

        Self {
            records: kept,
            by_id,
            loaded_at: Utc::now(),
            source,
        }
    }

    /// Fetches every row from `source` and builds a snapshot.
    ///
    /// A failed fetch returns the error; there is no partial snapshot.
    pub async fn load(source: &dyn ProfessionalSource) -> Result<Self> {
        let started = Instant::now();
        let label = source.label();
        let rows = source.fetch_all().await?;
        let snapshot = Self::from_rows(rows, label);
        log::info!(
            "directory snapshot loaded source={} records={} load_ms={}",
            snapshot.source,
            snapshot.len(),
            started.elapsed().as_millis(),
        );
        Ok(snapshot)
    }

    /// An empty snapshot, used before anything was loaded.
    pub fn empty(source: impl Into<String>) -> Self {
        Self::from_records(Vec::new(), source)
    }

    pub fn records(&self) -> &[Arc<ProfessionalRecord>] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ProfessionalRecord>> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn status(&self) -> SnapshotStatus {
        SnapshotStatus {
            record_count: self.len(),
            loaded_at: self.loaded_at,
            source: self.source.clone(),
        }
    }
}
