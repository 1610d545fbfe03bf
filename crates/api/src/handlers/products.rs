//! Handlers for the `/products` resource, including the stock endpoints.

use abcpos_core::audit::{actions, tables};
use abcpos_core::error::CoreError;
use abcpos_core::types::DbId;
use abcpos_db::models::product::{CreateProduct, Product, ProductQuery, UpdateProduct};
use abcpos_db::models::stock_history::StockHistoryEntry;
use abcpos_db::repositories::{ProductRepo, StockHistoryRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::audit::AuditEvent;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::stock;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /products`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: Option<i32>,
    /// Defaults to `active` if omitted.
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Request body for `PUT /products/{id}`. Stock is intentionally absent:
/// use the stock endpoint instead.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Request body for `PUT /products/{id}/stock`.
#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub new_stock: i32,
    /// Derived from the sign of the delta if omitted.
    pub change_type: Option<String>,
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// CRUD handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products
///
/// List products with optional `status`, `category`, and `search` filters.
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ProductQuery>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    input.validate()?;

    let create = CreateProduct {
        name: input.name,
        category: input.category,
        price: input.price,
        stock: input.stock,
        status: input.status,
        image_url: input.image_url,
        description: input.description,
        created_by: Some(user.user_id),
    };
    let product = ProductRepo::create(&state.pool, &create).await?;

    state.audit.record(
        &user.actor(),
        AuditEvent {
            action: actions::CREATE,
            table_name: tables::PRODUCTS,
            record_id: Some(product.id),
            old_values: None,
            new_values: serde_json::to_value(&product).ok(),
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductRequest>,
) -> AppResult<Json<DataResponse<Product>>> {
    input.validate()?;

    // Snapshot the current row for the audit entry.
    let old = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;

    let update = UpdateProduct {
        name: input.name,
        category: input.category,
        price: input.price,
        status: input.status,
        image_url: input.image_url,
        description: input.description,
    };
    let product = ProductRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;

    state.audit.record(
        &user.actor(),
        AuditEvent {
            action: actions::UPDATE,
            table_name: tables::PRODUCTS,
            record_id: Some(product.id),
            old_values: serde_json::to_value(&old).ok(),
            new_values: serde_json::to_value(&product).ok(),
        },
    );

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
///
/// Hard delete. Existing order items keep their snapshots; their
/// `product_id` becomes NULL via the foreign key.
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let old = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id,
        })?;

    let deleted = ProductRepo::hard_delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "product",
            id,
        }
        .into());
    }

    state.audit.record(
        &user.actor(),
        AuditEvent {
            action: actions::DELETE,
            table_name: tables::PRODUCTS,
            record_id: Some(id),
            old_values: serde_json::to_value(&old).ok(),
            new_values: None,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Stock handlers
// ---------------------------------------------------------------------------

/// PUT /api/v1/products/{id}/stock
///
/// Write a new stock value through the ledger.
pub async fn set_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AdjustStockRequest>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = stock::adjust_stock(
        &state.pool,
        &user.actor(),
        id,
        input.new_stock,
        input.change_type,
        input.reason,
    )
    .await?;

    Ok(Json(DataResponse { data: product }))
}

/// GET /api/v1/products/{id}/stock-history
///
/// The product's ledger entries, newest first.
pub async fn stock_history(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StockHistoryEntry>>>> {
    let entries = StockHistoryRepo::list_by_product(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}
