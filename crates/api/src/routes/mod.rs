pub mod admin;
pub mod audit_logs;
pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
/// /auth/me                         current user profile (requires auth)
///
/// /products                        list, create
/// /products/{id}                   get, update, delete
/// /products/{id}/stock             write stock through the ledger (PUT)
/// /products/{id}/stock-history     ledger entries (GET)
///
/// /orders                          list, place order
/// /orders/{id}                     get (header + items)
/// /orders/{id}/status              overwrite status (PUT)
///
/// /sales                           sales range query (GET)
/// /dashboard/stats                 dashboard aggregate (GET)
///
/// /admin/users                     list, create (admin only)
/// /admin/users/{id}                update (admin only)
///
/// /admin/audit-logs                query audit trail (admin only)
///
/// /uploads/product-image           upload (POST), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Product catalog and stock ledger endpoints.
        .nest("/products", products::router())
        // Orders and the checkout workflow.
        .nest("/orders", orders::router())
        // Reporting: sales range + dashboard stats.
        .merge(reports::router())
        // Admin: user management.
        .nest("/admin/users", admin::router())
        // Admin: audit trail queries.
        .nest("/admin/audit-logs", audit_logs::router())
        // Product image uploads.
        .nest("/uploads", uploads::router())
}
