//! Refresh-token session entity model and DTOs.

use abcpos_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A refresh-token session row. Only the SHA-256 hash of the opaque refresh
/// token is stored, so a database leak does not compromise active sessions.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
