//! Append-only stock ledger entries.

use abcpos_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A stock history row. Append-only: `change_amount = new_stock - previous_stock`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockHistoryEntry {
    pub id: DbId,
    pub product_id: DbId,
    pub previous_stock: i32,
    pub new_stock: i32,
    pub change_amount: i32,
    pub change_type: String,
    pub reason: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for appending a stock history entry.
#[derive(Debug, Clone)]
pub struct CreateStockHistory {
    pub product_id: DbId,
    pub previous_stock: i32,
    pub new_stock: i32,
    pub change_amount: i32,
    pub change_type: String,
    pub reason: Option<String>,
    pub created_by: Option<DbId>,
}
