//! Dashboard statistics via the `get_dashboard_stats()` SQL function.
//!
//! The aggregate is computed server-side (the function is defined in a
//! migration) and returned as a single JSON document; the client treats it
//! as an opaque remote-procedure result.

use sqlx::PgPool;

/// Provides the dashboard statistics remote call.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Fetch the dashboard aggregate as implementation-defined JSON.
    pub async fn stats(pool: &PgPool) -> Result<serde_json::Value, sqlx::Error> {
        sqlx::query_scalar::<_, serde_json::Value>("SELECT get_dashboard_stats()")
            .fetch_one(pool)
            .await
    }
}
