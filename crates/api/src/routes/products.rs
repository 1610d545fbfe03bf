//! Route definitions for the `/products` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                     -> list products
/// POST   /                     -> create product
/// GET    /{id}                 -> get product
/// PUT    /{id}                 -> update product (no stock)
/// DELETE /{id}                 -> hard delete product
/// PUT    /{id}/stock           -> write stock through the ledger
/// GET    /{id}/stock-history   -> ledger entries, newest first
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/{id}/stock", put(products::set_stock))
        .route("/{id}/stock-history", get(products::stock_history))
}
