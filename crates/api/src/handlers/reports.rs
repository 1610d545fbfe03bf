//! Handlers for reporting: the sales range query and the dashboard
//! statistics remote call.

use abcpos_core::types::Timestamp;
use abcpos_db::models::sale::Sale;
use abcpos_db::repositories::{DashboardRepo, SaleRepo};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /sales`.
#[derive(Debug, Deserialize)]
pub struct SalesRangeParams {
    /// Defaults to 30 days ago.
    pub from: Option<Timestamp>,
    /// Defaults to now.
    pub to: Option<Timestamp>,
}

/// GET /api/v1/sales?from=X&to=Y
///
/// Sales rows within the range, oldest first (for charting).
pub async fn sales_range(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<SalesRangeParams>,
) -> AppResult<Json<DataResponse<Vec<Sale>>>> {
    let to = params.to.unwrap_or_else(chrono::Utc::now);
    let from = params
        .from
        .unwrap_or_else(|| chrono::Utc::now() - chrono::Duration::days(30));

    let sales = SaleRepo::list_range(&state.pool, from, to).await?;
    Ok(Json(DataResponse { data: sales }))
}

/// GET /api/v1/dashboard/stats
///
/// The dashboard aggregate, computed server-side by the
/// `get_dashboard_stats()` SQL function and passed through as JSON.
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
