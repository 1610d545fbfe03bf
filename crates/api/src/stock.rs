//! Stock ledger updater: the only write path for product stock.
//!
//! Every stock mutation writes the new value and appends a `stock_history`
//! entry recording the transition. The read and the write are separate
//! statements, so concurrent adjustments to the same product can interleave;
//! the ledger records what each writer saw, not a serialized truth.

use abcpos_core::error::CoreError;
use abcpos_core::stock::{classify_change, stock_delta};
use abcpos_core::types::DbId;
use abcpos_db::models::product::Product;
use abcpos_db::models::stock_history::CreateStockHistory;
use abcpos_db::repositories::{ProductRepo, StockHistoryRepo};
use abcpos_db::DbPool;

use crate::audit::Actor;
use crate::error::AppError;

/// Set a product's stock to `new_stock` and append a ledger entry.
///
/// The stock write is authoritative: if it fails, the whole call fails. The
/// ledger append is best-effort; a failure there is logged and the updated
/// product is still returned.
///
/// When `change_type` is not supplied it is derived from the sign of the
/// delta (positive -> increase, negative -> decrease, zero -> set).
pub async fn adjust_stock(
    pool: &DbPool,
    actor: &Actor,
    product_id: DbId,
    new_stock: i32,
    change_type: Option<String>,
    reason: Option<String>,
) -> Result<Product, AppError> {
    let product = ProductRepo::find_by_id(pool, product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id: product_id,
        })?;

    let previous_stock = product.stock;

    let updated = ProductRepo::set_stock(pool, product_id, new_stock)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "product",
            id: product_id,
        })?;

    let change_amount = stock_delta(previous_stock, new_stock);
    let change_type =
        change_type.unwrap_or_else(|| classify_change(change_amount).to_string());

    let entry = CreateStockHistory {
        product_id,
        previous_stock,
        new_stock,
        change_amount,
        change_type,
        reason,
        created_by: actor.user_id,
    };

    if let Err(e) = StockHistoryRepo::insert(pool, &entry).await {
        tracing::warn!(
            error = %e,
            product_id,
            "Failed to append stock history entry"
        );
    }

    Ok(updated)
}
