//! Repository for the `orders` and `order_items` tables.
//!
//! Order creation is deliberately NOT transactional here: the checkout
//! workflow sequences the header insert, item insert, and compensation
//! delete as separate calls, matching the partial-failure semantics the
//! platform guarantees (and no more).

use abcpos_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::order::{
    CreateOrder, CreateOrderItem, Order, OrderItem, OrderQuery, OrderWithItems,
};

/// Column list for `orders` SELECT queries.
const COLUMNS: &str = "\
    id, order_number, customer_name, customer_phone, total_amount, status, \
    payment_method, payment_status, payment_reference, payment_qr_payload, \
    created_by, order_date, completed_at, created_at, updated_at";

/// Column list for `order_items` SELECT queries.
const ITEM_COLUMNS: &str =
    "id, order_id, product_id, product_name, quantity, unit_price, subtotal, created_at";

/// Provides query and insert operations for orders and their line items.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order header, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (order_number, customer_name, customer_phone, total_amount, \
             status, payment_method, payment_status, payment_reference, payment_qr_payload, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&input.order_number)
            .bind(&input.customer_name)
            .bind(&input.customer_phone)
            .bind(input.total_amount)
            .bind(&input.status)
            .bind(&input.payment_method)
            .bind(&input.payment_status)
            .bind(&input.payment_reference)
            .bind(&input.payment_qr_payload)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Batch insert order line items.
    ///
    /// Uses a single INSERT with multiple value rows for efficiency.
    pub async fn insert_items(
        pool: &PgPool,
        items: &[CreateOrderItem],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = String::from(
            "INSERT INTO order_items \
             (order_id, product_id, product_name, quantity, unit_price, subtotal) VALUES ",
        );
        let mut param_idx = 1u32;
        let mut first = true;

        for _ in items {
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

        query.push_str(&format!(" RETURNING {ITEM_COLUMNS}"));

        let mut q = sqlx::query_as::<_, OrderItem>(&query);
        for item in items {
            q = q
                .bind(item.order_id)
                .bind(item.product_id)
                .bind(&item.product_name)
                .bind(item.quantity)
                .bind(item.unit_price)
                .bind(item.subtotal);
        }

        q.fetch_all(pool).await
    }

    /// Find an order header by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the line items of an order, in insertion order.
    pub async fn find_items(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Find an order header together with its line items.
    pub async fn find_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let Some(order) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::find_items(pool, id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    /// List orders with optional filters, newest first, each with its items.
    pub async fn list(
        pool: &PgPool,
        params: &OrderQuery,
    ) -> Result<Vec<OrderWithItems>, sqlx::Error> {
        let (where_clause, statuses, dates) = build_order_filter(params);
        let query =
            format!("SELECT {COLUMNS} FROM orders {where_clause} ORDER BY order_date DESC");

        let mut q = sqlx::query_as::<_, Order>(&query);
        for status in &statuses {
            q = q.bind(status.as_str());
        }
        for date in &dates {
            q = q.bind(*date);
        }
        let orders = q.fetch_all(pool).await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = Self::find_items(pool, order.id).await?;
            result.push(OrderWithItems { order, items });
        }
        Ok(result)
    }

    /// Overwrite an order's status. No transition validation: any status may
    /// replace any other. When the new status is `completed`, `completed_at`
    /// is stamped; otherwise it is left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = if status == abcpos_core::order::order_status::COMPLETED {
            format!(
                "UPDATE orders SET status = $2, completed_at = NOW(), updated_at = NOW() \
                 WHERE id = $1 RETURNING {COLUMNS}"
            )
        } else {
            format!(
                "UPDATE orders SET status = $2, updated_at = NOW() \
                 WHERE id = $1 RETURNING {COLUMNS}"
            )
        };
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an order header by ID. Returns `true` if a row was removed.
    ///
    /// Used by the checkout compensation path when the item insert fails
    /// after the header was created.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build a WHERE clause from `OrderQuery` filter parameters.
///
/// Returns `(where_clause, status_binds, date_binds)` with statuses bound
/// before dates, matching the bind order in [`OrderRepo::list`].
fn build_order_filter(params: &OrderQuery) -> (String, Vec<String>, Vec<Timestamp>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut statuses: Vec<String> = Vec::new();
    let mut dates: Vec<Timestamp> = Vec::new();
    let mut bind_idx = 1u32;

    if let Some(ref status) = params.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        statuses.push(status.clone());
    }

    if let Some(from) = params.from {
        conditions.push(format!("order_date >= ${bind_idx}"));
        bind_idx += 1;
        dates.push(from);
    }

    if let Some(to) = params.to {
        conditions.push(format!("order_date <= ${bind_idx}"));
        let _ = bind_idx;
        dates.push(to);
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, statuses, dates)
}
