//! Order checkout workflow.
//!
//! Placing an order is a sequence of independent writes, NOT a database
//! transaction. The guarantees are exactly:
//!
//! 1. Header insert fails -> nothing was written, the error is returned.
//! 2. Item insert fails -> one compensation delete of the header is
//!    attempted, then the error is returned. If the delete also fails, the
//!    orphaned header stays.
//! 3. Sales mirror and stock decrements are best-effort: their failures are
//!    logged and the order still succeeds.
//!
//! Stock reads and writes are not atomic, so concurrent checkouts of the
//! same product can interleave and lose decrements.

use abcpos_core::audit::{actions, tables};
use abcpos_core::order::{
    default_payment_status, generate_order_number_now, line_subtotal, order_status, order_total,
    payment_methods,
};
use abcpos_core::stock::change_types;
use abcpos_core::types::DbId;
use abcpos_db::models::order::{CreateOrder, CreateOrderItem, OrderWithItems};
use abcpos_db::models::sale::CreateSale;
use abcpos_db::repositories::{OrderRepo, ProductRepo, SaleRepo};
use abcpos_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::audit::{Actor, AuditEvent, AuditRecorder};
use crate::error::AppError;
use crate::stock;

/// One cart line in a checkout request. Name and price are snapshots taken
/// by the client at cart time, not re-read from the catalog.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutItem {
    pub product_id: DbId,
    #[validate(length(min = 1, message = "product_name must not be empty"))]
    pub product_name: String,
    /// Zero is allowed: a free-item or placeholder line is accepted as-is.
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "unit_price must not be negative"))]
    pub unit_price: f64,
}

/// Request body for `POST /orders`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    /// Client-supplied order number; generated server-side if omitted.
    pub order_number: Option<String>,
    /// Defaults to `cash` if omitted.
    pub payment_method: Option<String>,
    /// Defaults per payment method (`cash` -> `paid`, else `pending`).
    pub payment_status: Option<String>,
    pub payment_reference: Option<String>,
    pub payment_qr_payload: Option<String>,
    #[validate(nested)]
    pub items: Vec<CheckoutItem>,
}

/// Place an order: header, items, sales mirror, stock decrements, audit.
///
/// Returns the complete order (header + items) re-read from the database.
pub async fn place_order(
    pool: &DbPool,
    audit: &AuditRecorder,
    actor: &Actor,
    input: CheckoutRequest,
) -> Result<OrderWithItems, AppError> {
    input.validate()?;

    let total_amount = order_total(input.items.iter().map(|i| (i.quantity, i.unit_price)));
    let order_number = input
        .order_number
        .clone()
        .unwrap_or_else(generate_order_number_now);

    let payment_method = input
        .payment_method
        .clone()
        .unwrap_or_else(|| payment_methods::CASH.to_string());
    let payment_status = input
        .payment_status
        .clone()
        .unwrap_or_else(|| default_payment_status(&payment_method).to_string());

    // Step 1: order header.
    let header = CreateOrder {
        order_number: order_number.clone(),
        customer_name: input.customer_name.clone(),
        customer_phone: input.customer_phone.clone(),
        total_amount,
        status: order_status::PENDING.to_string(),
        payment_method,
        payment_status,
        payment_reference: input.payment_reference.clone(),
        payment_qr_payload: input.payment_qr_payload.clone(),
        created_by: actor.user_id,
    };
    let order = OrderRepo::create(pool, &header).await?;

    // Step 2: line items, with single-shot compensation on failure.
    let item_rows: Vec<CreateOrderItem> = input
        .items
        .iter()
        .map(|i| CreateOrderItem {
            order_id: order.id,
            product_id: Some(i.product_id),
            product_name: i.product_name.clone(),
            quantity: i.quantity,
            unit_price: i.unit_price,
            subtotal: line_subtotal(i.quantity, i.unit_price),
        })
        .collect();

    if let Err(items_err) = OrderRepo::insert_items(pool, &item_rows).await {
        if let Err(delete_err) = OrderRepo::delete(pool, order.id).await {
            tracing::warn!(
                error = %delete_err,
                order_id = order.id,
                "Compensation delete failed; orphaned order header remains"
            );
        }
        return Err(items_err.into());
    }

    // Step 3: mirror items into sales for reporting. Best-effort.
    let sales: Vec<CreateSale> = input
        .items
        .iter()
        .map(|i| CreateSale {
            order_id: order.id,
            product_id: Some(i.product_id),
            product_name: i.product_name.clone(),
            quantity: i.quantity,
            unit_price: i.unit_price,
            total: line_subtotal(i.quantity, i.unit_price),
        })
        .collect();

    if let Err(e) = SaleRepo::batch_insert(pool, &sales).await {
        tracing::warn!(
            error = %e,
            order_id = order.id,
            "Failed to mirror order items into sales"
        );
    }

    // Step 4: decrement stock per line through the ledger. A vanished
    // product is skipped; a failed write is logged and skipped.
    for item in &input.items {
        match ProductRepo::find_by_id(pool, item.product_id).await {
            Ok(Some(product)) => {
                let new_stock = product.stock - item.quantity;
                if let Err(e) = stock::adjust_stock(
                    pool,
                    actor,
                    product.id,
                    new_stock,
                    Some(change_types::DECREASE.to_string()),
                    Some(format!("Order {order_number}")),
                )
                .await
                {
                    tracing::warn!(
                        error = %e,
                        product_id = product.id,
                        order_id = order.id,
                        "Failed to decrement stock for order item"
                    );
                }
            }
            Ok(None) => {
                tracing::warn!(
                    product_id = item.product_id,
                    order_id = order.id,
                    "Product missing during stock decrement; skipping"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    product_id = item.product_id,
                    order_id = order.id,
                    "Failed to load product for stock decrement; skipping"
                );
            }
        }
    }

    // Step 5: re-read the complete order for the response and the audit
    // snapshot.
    let complete = OrderRepo::find_with_items(pool, order.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Order {} disappeared after creation", order.id))
        })?;

    audit.record(
        actor,
        AuditEvent {
            action: actions::CREATE,
            table_name: tables::ORDERS,
            record_id: Some(complete.order.id),
            old_values: None,
            new_values: serde_json::to_value(&complete).ok(),
        },
    );

    Ok(complete)
}
