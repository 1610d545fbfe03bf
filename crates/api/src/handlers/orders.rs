//! Handlers for the `/orders` resource.
//!
//! Order placement is delegated to the checkout workflow; these handlers
//! only shape HTTP in and out.

use abcpos_core::audit::{actions, tables};
use abcpos_core::error::CoreError;
use abcpos_core::types::DbId;
use abcpos_db::models::order::{Order, OrderQuery, OrderWithItems};
use abcpos_db::repositories::OrderRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::audit::AuditEvent;
use crate::checkout::{self, CheckoutRequest};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    /// Any string is accepted: transitions are not validated.
    pub status: String,
}

/// GET /api/v1/orders
///
/// List orders with optional `status`, `from`, and `to` filters, each with
/// its line items.
pub async fn list_orders(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<OrderQuery>,
) -> AppResult<Json<DataResponse<Vec<OrderWithItems>>>> {
    let orders = OrderRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OrderWithItems>>> {
    let order = OrderRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "order", id })?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /api/v1/orders
///
/// Place an order through the checkout workflow.
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<OrderWithItems>>)> {
    let order = checkout::place_order(&state.pool, &state.audit, &user.actor(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// PUT /api/v1/orders/{id}/status
///
/// Overwrite an order's status. When the new status is `completed`,
/// `completed_at` is stamped.
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<DataResponse<Order>>> {
    // Snapshot the current row for the audit entry.
    let old = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "order", id })?;

    let order = OrderRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(CoreError::NotFound { entity: "order", id })?;

    state.audit.record(
        &user.actor(),
        AuditEvent {
            action: actions::UPDATE,
            table_name: tables::ORDERS,
            record_id: Some(order.id),
            old_values: serde_json::to_value(&old).ok(),
            new_values: serde_json::to_value(&order).ok(),
        },
    );

    Ok(Json(DataResponse { data: order }))
}
