//! Repository for the append-only `stock_history` table.

use abcpos_core::types::DbId;
use sqlx::PgPool;

use crate::models::stock_history::{CreateStockHistory, StockHistoryEntry};

/// Column list for `stock_history` SELECT queries.
const COLUMNS: &str = "\
    id, product_id, previous_stock, new_stock, change_amount, \
    change_type, reason, created_by, created_at";

/// Provides append and query operations for the stock ledger.
pub struct StockHistoryRepo;

impl StockHistoryRepo {
    /// Append a stock history entry, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateStockHistory,
    ) -> Result<StockHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO stock_history \
             (product_id, previous_stock, new_stock, change_amount, change_type, reason, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StockHistoryEntry>(&query)
            .bind(input.product_id)
            .bind(input.previous_stock)
            .bind(input.new_stock)
            .bind(input.change_amount)
            .bind(&input.change_type)
            .bind(&input.reason)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// List the ledger entries for a product, newest first.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<StockHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stock_history WHERE product_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, StockHistoryEntry>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }
}
