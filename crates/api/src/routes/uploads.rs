//! Route definitions for product image uploads.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST   /product-image -> multipart upload
/// DELETE /product-image -> remove a stored file
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/product-image",
        post(uploads::upload_product_image).delete(uploads::delete_product_image),
    )
}
