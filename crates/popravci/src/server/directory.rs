//! Directory API endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use directory::query::effective_page_size;
use directory::{
    DirectoryEntry, DirectoryError, EffectiveSort, Facets, ProfileView, QueryPage, QueryState,
    SnapshotStatus,
};

use crate::server::error::{ApiError, ApiErrorBody};
use crate::server::ServerState;

/// Response payload for search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<DirectoryEntry>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    pub effective_sort: EffectiveSort,
    /// Set when the records could not be loaded; the page is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl SearchResponse {
    fn unavailable(state: &QueryState, error: &DirectoryError) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            page: state.page_number,
            page_size: effective_page_size(state.page_size),
            effective_sort: state.effective_sort(),
            error: Some(ApiErrorBody::fetch_failed(error.to_string())),
        }
    }
}

impl From<QueryPage> for SearchResponse {
    fn from(page: QueryPage) -> Self {
        Self {
            items: page.items,
            total_count: page.total_count,
            total_pages: page.total_pages,
            page: page.page,
            page_size: page.page_size,
            effective_sort: page.effective_sort,
            error: None,
        }
    }
}

/// POST /majstori/search
///
/// Runs a query over the current snapshot. A failed load answers with an
/// empty page and an `error` indicator instead of an error status; a body
/// that is not a query state is a `bad_request`.
#[tracing::instrument(skip_all)]
pub(crate) async fn search(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<QueryState>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(query) = payload.map_err(ApiError::from)?;
    match state.catalog.engine().await {
        Ok(engine) => Ok(Json(engine.apply_query(&query).into())),
        Err(error) => {
            tracing::warn!("search without records: {error}");
            Ok(Json(SearchResponse::unavailable(&query, &error)))
        }
    }
}

/// GET /majstori/facets
#[tracing::instrument(skip_all)]
pub(crate) async fn facets(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Facets>, ApiError> {
    let engine = state.catalog.engine().await.map_err(ApiError::from)?;
    Ok(Json(engine.facets()))
}

/// GET /majstori/status
#[tracing::instrument(skip_all)]
pub(crate) async fn status(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<SnapshotStatus>, ApiError> {
    let snapshot = state.catalog.snapshot().await.map_err(ApiError::from)?;
    Ok(Json(snapshot.status()))
}

/// POST /majstori/refresh
///
/// Drops the cached snapshot and reloads it from the source.
#[tracing::instrument(skip_all)]
pub(crate) async fn refresh(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<SnapshotStatus>, ApiError> {
    let snapshot = state.catalog.refresh().await.map_err(ApiError::from)?;
    tracing::info!("snapshot refreshed with {} records", snapshot.len());
    Ok(Json(snapshot.status()))
}

/// GET /majstori/:id
#[tracing::instrument(skip_all)]
pub(crate) async fn profile(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let engine = state.catalog.engine().await.map_err(ApiError::from)?;
    engine
        .profile(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no professional with id {id}")))
}
