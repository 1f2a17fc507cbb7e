use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::db::ValidationError;
use crate::models::*;
use crate::service::InsightError;

// ============================================================
// Error Handling
// ============================================================

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(msg: impl Into<String>) -> ApiError {
    let error = msg.into();
    tracing::warn!("Validation error: {}", error);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            details: None,
        }),
    )
}

/// Log an internal error and return a sanitized response to the client.
///
/// [`ValidationError`]s are the exception: they describe a fixable input
/// problem and are returned as-is with BAD_REQUEST.
fn internal_error(e: anyhow::Error) -> ApiError {
    if let Some(validation) = e.downcast_ref::<ValidationError>() {
        return bad_request(validation.to_string());
    }

    tracing::error!("Internal error: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
            details: None,
        }),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Insights
// ============================================================

pub async fn generate_insights(
    State(state): State<AppState>,
    Json(request): Json<InsightRequest>,
) -> Result<Json<Insight>, ApiError> {
    state
        .insights
        .generate(&request)
        .await
        .map(Json)
        .map_err(|e| match e {
            InsightError::Malformed(parse) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "insight generation failed".to_string(),
                    details: Some(parse.to_string()),
                }),
            ),
        })
}

// ============================================================
// History
// ============================================================

/// Query parameters identifying whose history to read or clear.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: Option<String>,
}

impl HistoryQuery {
    fn require_user(&self) -> Result<&str, ApiError> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| bad_request("Missing user ID"))
    }
}

pub async fn save_history(
    State(state): State<AppState>,
    Json(input): Json<SaveScanInput>,
) -> Result<(StatusCode, Json<SaveScanResponse>), ApiError> {
    state
        .db
        .save_scan(input)
        .map(|scan| (StatusCode::CREATED, Json(SaveScanResponse { scan })))
        .map_err(internal_error)
}

pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ScanListResponse>, ApiError> {
    let user_id = query.require_user()?;
    state
        .db
        .list_scans(user_id)
        .map(|scans| Json(ScanListResponse { scans }))
        .map_err(internal_error)
}

pub async fn clear_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ClearScansResponse>, ApiError> {
    let user_id = query.require_user()?;
    let deleted = state.db.clear_scans(user_id).map_err(internal_error)?;
    tracing::info!(user_id, deleted, "Cleared scan history");
    Ok(Json(ClearScansResponse { deleted }))
}
