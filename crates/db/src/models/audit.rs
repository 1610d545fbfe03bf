//! Audit log entity model and DTOs.
//!
//! Audit logs are append-only and immutable (no `updated_at`). Snapshots are
//! stored with sensitive fields already redacted by the recorder.

use abcpos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry: who did what, to which row, with before/after
/// snapshots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub action: String,
    pub table_name: String,
    pub record_id: Option<DbId>,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub action: String,
    pub table_name: String,
    pub record_id: Option<DbId>,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Filter parameters for querying audit logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub user_id: Option<DbId>,
    pub table_name: Option<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
