use axum::extract::{Extension, Path, State};

use crate::database::models::ComplaintWithOwner;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

/// GET /api/complaints/:id
pub async fn get_complaint(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<ComplaintWithOwner> {
    let complaint = state.complaints.get_by_id(&id, &user).await?;
    Ok(ApiResponse::success(complaint))
}
