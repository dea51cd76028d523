//! JSON API under `/api`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};

use super::{
    AppState,
    store::{NewPart, Page, PartFilter, StoreError},
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    message: &'static str,
}

/// An error answered as `{"error": ..., "details": ...}`.
#[derive(Debug)]
pub(super) struct ApiError {
    status: StatusCode,
    error: &'static str,
    details: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str) -> Self {
        Self {
            status,
            error,
            details: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn internal(message: &'static str, source: StoreError) -> Self {
        tracing::error!(error = %source, "{message}");

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message).with_details(source.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };

        (self.status, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

// Query values stay strings so an empty `?type=` reads as absent and a bad
// number gets a JSON error instead of the extractor's plain-text one.
#[derive(Debug, Default, Deserialize)]
struct PartsQuery {
    limit: Option<String>,
    offset: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    site_id: Option<String>,
    newer_than_hours: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    limit: Option<String>,
    offset: Option<String>,
}

/// API routes, to be nested under `/api`. Unknown API paths get a JSON 404.
pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/sites", get(list_sites))
        .route("/sites/{id}", get(site))
        .route(
            "/sites/{id}/parts",
            get(site_parts).post(record_site_parts).delete(delete_site_parts),
        )
        .route("/parts", get(parts))
        .route("/parts/{id}", get(part))
        .fallback(not_found)
}

async fn health() -> Json<HealthResponse> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(HealthResponse {
        status: "healthy",
        timestamp,
        message: "DSM Parts Finder API is running",
    })
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

async fn list_sites(State(state): State<Arc<AppState>>) -> ApiResult {
    let sites = state
        .store()
        .list_sites()
        .await
        .map_err(|e| ApiError::internal("Failed to query sites", e))?;

    Ok(Json(json!({
        "data": sites,
        "message": "Sites retrieved successfully",
        "total": sites.len(),
    })))
}

async fn site(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult {
    let id = site_id(&id)?;

    let site = state
        .store()
        .site(id)
        .await
        .map_err(|e| ApiError::internal("Failed to query site", e))?
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Site not found"))?;

    Ok(Json(json!({
        "data": site,
        "message": "Site retrieved successfully",
    })))
}

async fn site_parts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult {
    let id = site_id(&id)?;
    let page = page(query.limit.as_deref(), query.offset.as_deref())?;

    let parts = state
        .store()
        .parts_by_site(id, page)
        .await
        .map_err(|e| ApiError::internal("Failed to query parts for site", e))?;

    Ok(Json(json!({
        "data": parts,
        "message": "Parts retrieved successfully",
        "total": parts.len(),
        "site_id": id,
        "limit": page.limit,
        "offset": page.offset,
    })))
}

/// Stores a batch of listings reported for one site.
async fn record_site_parts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Vec<NewPart>>, JsonRejection>,
) -> ApiResult {
    let id = site_id(&id)?;
    let Json(fetched) = body.map_err(|rejection| {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body").with_details(rejection.body_text())
    })?;

    let store = state.store();

    if store
        .site(id)
        .await
        .map_err(|e| ApiError::internal("Failed to query site", e))?
        .is_none()
    {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "Site not found"));
    }

    let summary = store
        .record_parts(id, &fetched, OffsetDateTime::now_utc())
        .await
        .map_err(|e| ApiError::internal("Failed to store parts", e))?;

    Ok(Json(json!({
        "data": summary.inserted,
        "message": "Parts stored successfully",
        "total": summary.inserted.len(),
        "refreshed": summary.refreshed,
        "removed": summary.removed,
    })))
}

async fn delete_site_parts(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult {
    let id = site_id(&id)?;

    let deleted = state
        .store()
        .delete_parts_by_site(id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete parts for site", e))?;

    tracing::info!(site_id = id, deleted, "deleted parts for site");

    Ok(Json(json!({
        "message": "Parts deleted successfully",
        "site_id": id,
    })))
}

async fn parts(State(state): State<Arc<AppState>>, Query(query): Query<PartsQuery>) -> ApiResult {
    let page = page(query.limit.as_deref(), query.offset.as_deref())?;
    let filter = part_filter(&query, OffsetDateTime::now_utc())?;
    let store = state.store();

    let parts = store
        .parts(&filter, page)
        .await
        .map_err(|e| ApiError::internal("Failed to query parts", e))?;
    let total = store
        .count_parts(&filter)
        .await
        .map_err(|e| ApiError::internal("Failed to get total parts count", e))?;

    let message = if filter.is_empty() {
        "Parts retrieved successfully"
    } else {
        "Filtered parts retrieved successfully"
    };

    Ok(Json(json!({
        "data": parts,
        "message": message,
        "total": total,
        "limit": page.limit,
        "offset": page.offset,
    })))
}

async fn part(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid part ID"))?;

    let part = state
        .store()
        .part(id)
        .await
        .map_err(|e| ApiError::internal("Failed to query part", e))?
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Part not found"))?;

    Ok(Json(json!({
        "data": part,
        "message": "Part retrieved successfully",
    })))
}

fn site_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid site ID"))
}

// A present, non-blank query value parsed as an integer.
fn number(value: Option<&str>, name: &str) -> Result<Option<i64>, ApiError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            ApiError::new(StatusCode::BAD_REQUEST, "Invalid query parameters")
                .with_details(format!("{name} must be a whole number, got '{value}'"))
        }),
    }
}

fn page(limit: Option<&str>, offset: Option<&str>) -> Result<Page, ApiError> {
    Ok(Page {
        limit: number(limit, "limit")?
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(0, MAX_LIMIT),
        offset: number(offset, "offset")?.unwrap_or(0).max(0),
    })
}

fn part_filter(query: &PartsQuery, now: OffsetDateTime) -> Result<PartFilter, ApiError> {
    let type_name = query
        .type_name
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    // `site_id=0` is how the page asks for every site.
    let site_id = number(query.site_id.as_deref(), "site_id")?.filter(|&id| id != 0);

    let newer_than = number(query.newer_than_hours.as_deref(), "newer_than_hours")?
        .map(|hours| now - Duration::hours(hours));

    Ok(PartFilter {
        type_name,
        site_id,
        newer_than,
    })
}
