//! Repository for the `sales` table (denormalized reporting rows).

use abcpos_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::sale::{CreateSale, Sale};

/// Column list for `sales` SELECT queries.
const COLUMNS: &str =
    "id, order_id, product_id, product_name, quantity, unit_price, total, sale_date";

/// Provides insert and range-query operations for sales records.
pub struct SaleRepo;

impl SaleRepo {
    /// Batch insert sales rows mirroring an order's line items.
    pub async fn batch_insert(
        pool: &PgPool,
        records: &[CreateSale],
    ) -> Result<Vec<Sale>, sqlx::Error> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = String::from(
            "INSERT INTO sales \
             (order_id, product_id, product_name, quantity, unit_price, total) VALUES ",
        );
        let mut param_idx = 1u32;
        let mut first = true;

        for _ in records {
            if !first {
                query.push_str(", ");
            }
            first = false;
            query.push('(');
            for i in 0..6 {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!("${param_idx}"));
                param_idx += 1;
            }
            query.push(')');
        }

        query.push_str(&format!(" RETURNING {COLUMNS}"));

        let mut q = sqlx::query_as::<_, Sale>(&query);
        for record in records {
            q = q
                .bind(record.order_id)
                .bind(record.product_id)
                .bind(&record.product_name)
                .bind(record.quantity)
                .bind(record.unit_price)
                .bind(record.total);
        }

        q.fetch_all(pool).await
    }

    /// List sales within a date range, oldest first (for charting).
    pub async fn list_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Sale>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sales \
             WHERE sale_date >= $1 AND sale_date <= $2 \
             ORDER BY sale_date ASC"
        );
        sqlx::query_as::<_, Sale>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
