//! Route definitions for audit trail queries.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit_logs;
use crate::state::AppState;

/// Routes mounted at `/admin/audit-logs`. Admin only.
///
/// ```text
/// GET / -> query audit logs (filters + pagination)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(audit_logs::query_audit_logs))
}
