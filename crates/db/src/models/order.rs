//! Order and order-item entity models and DTOs.

use abcpos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An order header row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_reference: Option<String>,
    pub payment_qr_payload: Option<String>,
    pub created_by: Option<DbId>,
    pub order_date: Timestamp,
    /// Set exactly when the status becomes `completed`.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order line-item row. Immutable once created: there is no update DTO
/// and no update path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    /// Nullable: set to NULL if the product is later hard-deleted.
    pub product_id: Option<DbId>,
    /// Denormalized snapshot of the product name at order time.
    pub product_name: String,
    pub quantity: i32,
    /// Snapshot of the unit price at order time.
    pub unit_price: f64,
    /// Always `quantity * unit_price` at creation time.
    pub subtotal: f64,
    pub created_at: Timestamp,
}

/// An order header together with its line items, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// DTO for inserting a new order header.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub order_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_reference: Option<String>,
    pub payment_qr_payload: Option<String>,
    pub created_by: Option<DbId>,
}

/// DTO for inserting a single order line item.
#[derive(Debug, Clone)]
pub struct CreateOrderItem {
    pub order_id: DbId,
    pub product_id: Option<DbId>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Filter parameters for order listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
