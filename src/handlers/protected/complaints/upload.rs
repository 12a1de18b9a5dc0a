use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::ApiError;

/// Stream an uploaded image into `dir`, counting bytes as they arrive.
///
/// Returns the stored reference (the file path as a string), or `None` when
/// the field carried no bytes (an empty file input). Over `max_bytes` the
/// partial file is removed and the request fails with 413.
pub async fn store_image(
    mut field: Field<'_>,
    dir: &Path,
    max_bytes: usize,
) -> Result<Option<String>, ApiError> {
    let file_name = format!("image-{}{}", Uuid::new_v4().simple(), extension(field.file_name()));
    let path = dir.join(file_name);

    match write_field(&mut field, &path, max_bytes).await {
        Ok(0) => {
            discard(&path).await;
            Ok(None)
        }
        Ok(written) => {
            tracing::debug!("Stored image {} ({} bytes)", path.display(), written);
            Ok(Some(path.to_string_lossy().into_owned()))
        }
        Err(e) => {
            discard(&path).await;
            Err(e)
        }
    }
}

async fn write_field(field: &mut Field<'_>, path: &Path, max_bytes: usize) -> Result<usize, ApiError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0usize;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        written += chunk.len();
        if written > max_bytes {
            // drain the rest so the client sees the 413 instead of a reset
            while field.chunk().await.map_err(multipart_error)?.is_some() {}
            return Err(too_large(max_bytes));
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(written)
}

/// Remove a stored or partial upload; failures are logged only
pub async fn discard(path: impl AsRef<Path>) {
    let path = path.as_ref();
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
        }
    }
}

pub fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("Request body too large")
    } else {
        ApiError::bad_request(err.body_text())
    }
}

fn too_large(max_bytes: usize) -> ApiError {
    ApiError::payload_too_large(format!(
        "Image exceeds the {} MB upload limit",
        max_bytes / (1024 * 1024)
    ))
}

/// Keep a short alphanumeric extension from the client's file name, lowercased
fn extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
