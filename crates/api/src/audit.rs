//! Fire-and-forget audit trail recorder.
//!
//! Audit writes run on detached tasks and never surface failures: a lost
//! audit entry must not fail the business write it describes. Snapshots are
//! redacted before they leave the request context.

use abcpos_core::audit::redact_sensitive_fields;
use abcpos_core::types::DbId;
use abcpos_db::models::audit::CreateAuditLog;
use abcpos_db::repositories::AuditLogRepo;
use abcpos_db::DbPool;

/// Who performed an action. Passed explicitly from the request context so
/// the recorder never has to guess the caller from ambient state.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    /// The request's `User-Agent` header, if present.
    pub user_agent: Option<String>,
}

/// A single audit event: what happened to which row, with optional
/// before/after snapshots.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// One of the constants in [`abcpos_core::audit::actions`].
    pub action: &'static str,
    /// One of the constants in [`abcpos_core::audit::tables`].
    pub table_name: &'static str,
    pub record_id: Option<DbId>,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
}

/// Records audit events asynchronously against the shared pool.
#[derive(Clone)]
pub struct AuditRecorder {
    pool: DbPool,
}

impl AuditRecorder {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record an audit event on a detached task.
    ///
    /// Returns immediately; the insert happens in the background. Failures
    /// are logged at WARN and otherwise dropped.
    pub fn record(&self, actor: &Actor, event: AuditEvent) {
        let pool = self.pool.clone();
        let entry = CreateAuditLog {
            user_id: actor.user_id,
            username: actor.username.clone(),
            action: event.action.to_string(),
            table_name: event.table_name.to_string(),
            record_id: event.record_id,
            old_values: event.old_values.map(|v| redact_sensitive_fields(&v)),
            new_values: event.new_values.map(|v| redact_sensitive_fields(&v)),
            ip_address: None,
            user_agent: actor.user_agent.clone(),
        };

        tokio::spawn(async move {
            if let Err(e) = AuditLogRepo::insert(&pool, &entry).await {
                tracing::warn!(
                    error = %e,
                    action = %entry.action,
                    table_name = %entry.table_name,
                    "Failed to record audit entry"
                );
            }
        });
    }
}
