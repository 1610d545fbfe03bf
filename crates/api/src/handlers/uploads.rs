//! Handlers for product image uploads under `/uploads`.

use abcpos_core::error::CoreError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::StoredImage;

/// Request body for `DELETE /uploads/product-image`.
#[derive(Debug, Deserialize)]
pub struct DeleteImageRequest {
    /// Relative path or serving URL of the stored file.
    pub path: String,
}

/// Response body for `DELETE /uploads/product-image`.
#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    pub deleted: bool,
}

/// POST /api/v1/uploads/product-image
///
/// Multipart upload of a single product image in a `file` field. The stored
/// file is served back under `/media`.
pub async fn upload_product_image(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<StoredImage>>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("Missing content type on file field".into()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file field: {e}")))?;

        let stored = state.media.save_product_image(&content_type, &bytes).await?;
        return Ok((StatusCode::CREATED, Json(DataResponse { data: stored })));
    }

    Err(CoreError::Validation("Missing 'file' field in multipart body".into()).into())
}

/// DELETE /api/v1/uploads/product-image
///
/// Remove a stored image. `deleted` is false if the file was already gone.
pub async fn delete_product_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<DeleteImageRequest>,
) -> AppResult<Json<DataResponse<DeleteImageResponse>>> {
    let deleted = state.media.delete(&input.path).await?;
    Ok(Json(DataResponse {
        data: DeleteImageResponse { deleted },
    }))
}
