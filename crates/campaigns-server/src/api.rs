//! API handlers for the campaign analytics server.

use crate::AppState;
use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campaigns_db::{ensure_ready, list_campaigns, summarize_campaigns, StoreError};
use campaigns_types::{Campaign, CampaignStatus, CampaignSummary, SERVICE_NAME};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Query parameters accepted by the campaign endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CampaignsQuery {
    /// Optional status filter, matched case-insensitively against
    /// `Active` and `Paused`. An empty value means no filter.
    pub status: Option<String>,
}

impl CampaignsQuery {
    /// Validates and normalizes the status filter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` if a non-empty status does not
    /// normalize to a known value.
    pub fn status_filter(&self) -> Result<Option<CampaignStatus>, ApiError> {
        match self.status.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => CampaignStatus::normalize(raw)
                .map(Some)
                .map_err(|e| ApiError::BadRequest(e.to_string())),
        }
    }
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// The service name.
    pub message: String,
}

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::InternalServerError(e.to_string())
    }
}

/// Detail returned for every 500; the cause is only logged.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "detail": message
        }));

        (status, body).into_response()
    }
}

/// Handler for `GET /`.
pub async fn root_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: SERVICE_NAME.to_string(),
    })
}

/// Handler for `GET /campaigns`.
///
/// Returns every campaign matching the optional `status` filter, ordered by
/// ascending `id`.
pub async fn list_campaigns_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<CampaignsQuery>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let status = params.status_filter()?;

    let campaigns = tokio::task::spawn_blocking(move || {
        let conn = state
            .pool
            .get()
            .map_err(|e| ApiError::InternalServerError(format!("db connection failed: {}", e)))?;
        ensure_ready(&conn)?;
        list_campaigns(&conn, status).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))??;

    Ok(Json(campaigns))
}

/// Handler for `GET /campaigns/summary`.
///
/// Returns click, cost and impression totals over the same filter that
/// `GET /campaigns` accepts.
pub async fn campaign_summary_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<CampaignsQuery>,
) -> Result<Json<CampaignSummary>, ApiError> {
    let status = params.status_filter()?;

    let summary = tokio::task::spawn_blocking(move || {
        let conn = state
            .pool
            .get()
            .map_err(|e| ApiError::InternalServerError(format!("db connection failed: {}", e)))?;
        ensure_ready(&conn)?;
        summarize_campaigns(&conn, status).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))??;

    Ok(Json(summary))
}
