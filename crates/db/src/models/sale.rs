//! Denormalized sales records for reporting.

use abcpos_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A sales row from the `sales` table — a denormalized mirror of an order
/// item, kept for reporting queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sale {
    pub id: DbId,
    pub order_id: Option<DbId>,
    pub product_id: Option<DbId>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total: f64,
    pub sale_date: Timestamp,
}

/// DTO for inserting a sales row.
#[derive(Debug, Clone)]
pub struct CreateSale {
    pub order_id: DbId,
    pub product_id: Option<DbId>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total: f64,
}
