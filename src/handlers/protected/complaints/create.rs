use axum::extract::{multipart::MultipartRejection, Extension, Multipart, State};
use std::path::Path;

use super::upload::{discard, multipart_error, store_image};
use crate::database::models::Complaint;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::ComplaintForm;

/// POST /api/complaints - file a complaint (citizen gate applied at the route)
///
/// Multipart fields: `title`, `description`, `category`, `location`, and an
/// optional `image` file. Unknown fields are ignored.
pub async fn create_complaint(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Complaint> {
    let mut multipart = multipart.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let server = &state.config.server;
    let mut form = ComplaintForm::default();

    if let Err(e) = read_form(&mut multipart, &mut form, &server.upload_dir, server.max_image_bytes).await {
        if let Some(image) = form.image_path.take() {
            discard(image).await;
        }
        return Err(e);
    }

    let image = form.image_path.clone();
    match state.complaints.create(&user, form).await {
        Ok(complaint) => Ok(ApiResponse::created(complaint)),
        Err(e) => {
            if let Some(image) = image {
                discard(image).await;
            }
            Err(e.into())
        }
    }
}

async fn read_form(
    multipart: &mut Multipart,
    form: &mut ComplaintForm,
    upload_dir: &Path,
    max_image_bytes: usize,
) -> Result<(), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "image" => {
                if form.image_path.is_some() {
                    return Err(ApiError::bad_request("Only one image may be uploaded"));
                }
                form.image_path = store_image(field, upload_dir, max_image_bytes).await?;
            }
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "description" => form.description = Some(field.text().await.map_err(multipart_error)?),
            "category" => form.category = Some(field.text().await.map_err(multipart_error)?),
            "location" => form.location = Some(field.text().await.map_err(multipart_error)?),
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    Ok(())
}
