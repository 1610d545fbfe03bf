use std::sync::Arc;

use crate::audit::AuditRecorder;
use crate::config::ServerConfig;
use crate::storage::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: abcpos_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fire-and-forget audit trail recorder.
    pub audit: AuditRecorder,
    /// Local filesystem store for uploaded product images.
    pub media: Arc<MediaStore>,
}
