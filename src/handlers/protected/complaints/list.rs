use axum::extract::{Extension, Path, State};

use crate::database::models::{Complaint, ComplaintWithOwner};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

/// GET /api/complaints - every complaint, newest first (admin gate applied at the route)
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Vec<ComplaintWithOwner>> {
    let complaints = state.complaints.list_all().await?;
    Ok(ApiResponse::success(complaints))
}

/// GET /api/complaints/user/:id - a citizen's own complaints, or any citizen's for admins
pub async fn list_user_complaints(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Complaint>> {
    let complaints = state.complaints.list_by_owner(&id, &user).await?;
    Ok(ApiResponse::success(complaints))
}
