//! Route definitions for reporting endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Reporting routes, merged directly into `/api/v1`.
///
/// ```text
/// GET /sales              -> sales rows in a date range
/// GET /dashboard/stats    -> dashboard aggregate (SQL function call)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sales", get(reports::sales_range))
        .route("/dashboard/stats", get(reports::dashboard_stats))
}
