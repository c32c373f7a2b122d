//! Route handlers.
//!
//! Reads hit the filesystem, so every handler moves its query onto the
//! blocking pool.

use super::AppState;
use super::error::ApiError;
use crate::dashboard::{DashboardStats, FilterParams, SiteFilter};
use crate::detection::{DetectionFileSummary, FsDetectionSource};
use crate::query::SiteQuery;
use crate::site::Site;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: crate::constants::APP_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/sites`, optionally narrowed by filter query parameters.
pub async fn list_sites(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<Vec<Site>>, ApiError> {
    let filter = parse_filter(params)?;
    let sites = run_query(&state, SiteQuery::list_sites).await?;
    Ok(Json(filter.apply(sites)))
}

/// `GET /api/sites/:id`
pub async fn get_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Site>, ApiError> {
    let lookup = id.clone();
    run_query(&state, move |query| query.get_site(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("site '{id}' not found")))
}

/// `GET /api/detections`
pub async fn list_detections(
    State(state): State<AppState>,
) -> Result<Json<Vec<DetectionFileSummary>>, ApiError> {
    run_query(&state, SiteQuery::list_detections).await.map(Json)
}

/// `GET /api/detections/:image_id`
pub async fn get_detection(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Json<DetectionFileSummary>, ApiError> {
    let lookup = image_id.clone();
    run_query(&state, move |query| query.get_detection(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("detection file '{image_id}' not found")))
}

/// `GET /api/stats`, computed over the filtered site set.
pub async fn stats(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<DashboardStats>, ApiError> {
    let filter = parse_filter(params)?;
    let sites = run_query(&state, SiteQuery::list_sites).await?;
    Ok(Json(DashboardStats::compute(&filter.apply(sites))))
}

fn parse_filter(
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<SiteFilter, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    SiteFilter::try_from(params).map_err(ApiError::BadRequest)
}

async fn run_query<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&SiteQuery<FsDetectionSource>) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let query = Arc::clone(&state.query);
    tokio::task::spawn_blocking(move || f(&query))
        .await
        .map_err(|e| ApiError::Internal(format!("query task failed: {e}")))?
        .map_err(ApiError::from)
}
