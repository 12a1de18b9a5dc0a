use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::database::models::Complaint;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    // kept loose so a non-string status reads as an invalid value, not bad JSON
    pub status: Option<Value>,
}

/// PUT /api/complaints/:id/status (admin gate applied at the route)
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Complaint> {
    let Json(update) = body.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

    let status = update.status.as_ref().and_then(Value::as_str);
    let complaint = state.complaints.update_status(&id, status).await?;
    Ok(ApiResponse::success(complaint))
}
