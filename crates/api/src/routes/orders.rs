//! Route definitions for the `/orders` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET  /               -> list orders (with items)
/// POST /               -> place order (checkout workflow)
/// GET  /{id}           -> get order with items
/// PUT  /{id}/status    -> overwrite status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/status", put(orders::update_order_status))
}
