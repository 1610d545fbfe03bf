//! Handlers for audit log queries under `/admin/audit-logs`. Admin only.

use abcpos_db::models::audit::{AuditLog, AuditQuery};
use abcpos_db::repositories::AuditLogRepo;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// A page of audit log entries with the total match count.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
}

/// GET /api/v1/admin/audit-logs
///
/// Query audit logs with filters and pagination, newest first. Admin only.
pub async fn query_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditQuery>,
) -> AppResult<Json<DataResponse<AuditLogPage>>> {
    let items = AuditLogRepo::query(&state.pool, &params).await?;
    let total = AuditLogRepo::count(&state.pool, &params).await?;

    Ok(Json(DataResponse {
        data: AuditLogPage { items, total },
    }))
}
