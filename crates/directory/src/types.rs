//! Record and result types for the professional directory.
//!
//! Backend rows arrive loosely typed ([`ProfessionalRow`]); they are turned
//! into strict [`ProfessionalRecord`] values once, at ingestion, so the
//! matching code never deals with missing fields.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::query::EffectiveSort;

/// A professional row as returned by the backend.
///
/// Every field is optional and tolerates `null`; see
/// [`ProfessionalRecord::from_row`] for the defaulting rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub categories: Option<Vec<Option<String>>>,
    pub contacts: Option<Vec<Option<String>>>,
    pub wait_time_days: Option<f64>,
    pub emergency_available: Option<bool>,
    pub weekend_evening: Option<bool>,
    pub service_area: Option<String>,
    pub languages: Option<Vec<Option<String>>>,
    pub bio: Option<String>,
    pub created_at: Option<String>,
    pub profile_picture: Option<String>,
}

/// One directory entry representing a service professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub location: String,
    pub categories: Vec<String>,
    pub languages: Vec<String>,
    pub contacts: Vec<String>,
    /// Rich-text (HTML) biography.
    pub bio: String,
    pub wait_time_days: Option<u32>,
    pub emergency_available: bool,
    pub weekend_evening: bool,
    /// Legacy free-text area; coexists with `location`.
    pub service_area: String,
    pub created_at: Option<DateTime<Utc>>,
    pub profile_picture: Option<String>,
}

impl ProfessionalRecord {
    /// Creates a record with the given id and name and every other field empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            name: name.into(),
            location: String::new(),
            categories: Vec::new(),
            languages: Vec::new(),
            contacts: Vec::new(),
            bio: String::new(),
            wait_time_days: None,
            emergency_available: false,
            weekend_evening: false,
            service_area: String::new(),
            created_at: None,
            profile_picture: None,
        }
    }

    /// Builds a strict record from a backend row.
    ///
    /// Absent strings become empty, absent collections become empty, absent
    /// flags become `false`. Negative or non-finite wait times and
    /// unparseable timestamps become `None`.
    pub fn from_row(row: ProfessionalRow) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            user_id: row.user_id,
            name: row.name.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            categories: collect_strings(row.categories),
            languages: collect_strings(row.languages),
            contacts: collect_strings(row.contacts),
            bio: row.bio.unwrap_or_default(),
            wait_time_days: row.wait_time_days.and_then(wait_days),
            emergency_available: row.emergency_available.unwrap_or(false),
            weekend_evening: row.weekend_evening.unwrap_or(false),
            service_area: row.service_area.unwrap_or_default(),
            created_at: row.created_at.as_deref().and_then(parse_timestamp),
            profile_picture: row.profile_picture.filter(|url| !url.trim().is_empty()),
        }
    }
}

impl From<ProfessionalRow> for ProfessionalRecord {
    fn from(row: ProfessionalRow) -> Self {
        Self::from_row(row)
    }
}

/// A record in a query result, annotated with its transient relevance score.
///
/// The score only exists while a free-text query is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryEntry {
    #[serde(flatten)]
    pub record: Arc<ProfessionalRecord>,
    #[serde(rename = "_searchScore", skip_serializing_if = "Option::is_none")]
    pub search_score: Option<u32>,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    /// Records on the requested page, in sorted order.
    pub items: Vec<DirectoryEntry>,
    /// Number of records that passed every filter.
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    /// Sort actually applied (relevance while a free-text query is active).
    pub effective_sort: EffectiveSort,
}

/// Summary of the loaded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStatus {
    pub record_count: usize,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
}

fn collect_strings(values: Option<Vec<Option<String>>>) -> Vec<String> {
    values.unwrap_or_default().into_iter().flatten().collect()
}

fn wait_days(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value.trunc() as u32)
    } else {
        None
    }
}

/// Parses backend timestamps (RFC 3339, or naive ISO 8601 taken as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

/// Accepts string or numeric ids.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(id)) => Some(id),
        Some(serde_json::Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}
