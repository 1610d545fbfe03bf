//! Repository for the append-only `audit_logs` table.

use abcpos_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

/// Column list for `audit_logs` SELECT queries.
const COLUMNS: &str = "\
    id, user_id, username, action, table_name, record_id, \
    old_values, new_values, ip_address, user_agent, created_at";

/// Default page size for audit queries when the caller does not specify one.
const DEFAULT_LIMIT: i64 = 100;

/// Provides insert and query operations for audit logs.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert a single audit log entry, returning the created row.
    pub async fn insert(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs \
             (user_id, username, action, table_name, record_id, old_values, new_values, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entry.user_id)
            .bind(&entry.username)
            .bind(&entry.action)
            .bind(&entry.table_name)
            .bind(entry.record_id)
            .bind(&entry.old_values)
            .bind(&entry.new_values)
            .bind(&entry.ip_address)
            .bind(&entry.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Query audit logs with filtering and pagination, newest first.
    pub async fn query(pool: &PgPool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        // Clamp so hostile or malformed query strings cannot reach Postgres
        // with a negative LIMIT/OFFSET.
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(0, 500);
        let offset = params.offset.unwrap_or(0).max(0);

        let (where_clause, bind_values, bind_idx) = build_audit_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, AuditLog>(&query);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
                BindValue::Timestamp(v) => q = q.bind(*v),
            }
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count audit logs matching the given filter (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &AuditQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_audit_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT FROM audit_logs {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
                BindValue::Timestamp(v) => q = q.bind(*v),
            }
        }
        q.fetch_one(pool).await
    }
}

/// Typed bind value for dynamically-built audit log queries.
enum BindValue {
    BigInt(i64),
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from `AuditQuery` filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_audit_filter(params: &AuditQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(user_id) = params.user_id {
        conditions.push(format!("user_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(user_id));
    }

    if let Some(ref table_name) = params.table_name {
        conditions.push(format!("table_name = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(table_name.clone()));
    }

    if let Some(from) = params.from {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = params.to {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
