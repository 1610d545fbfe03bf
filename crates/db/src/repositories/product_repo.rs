//! Repository for the `products` table.

use abcpos_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, ProductQuery, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, category, price, stock, status, image_url, \
    description, created_by, created_at, updated_at";

/// Provides CRUD operations for products.
///
/// The `stock` column is only written by [`ProductRepo::set_stock`]; regular
/// updates cannot touch it.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// If omitted, `stock` defaults to 0 and `status` to `active`.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, category, price, stock, status, image_url, description, created_by)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 'active'), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.price)
            .bind(input.stock)
            .bind(&input.status)
            .bind(&input.image_url)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products with optional filters, newest first.
    ///
    /// `status` and `category` are equality filters; `search` is a
    /// case-insensitive substring match on the product name.
    pub async fn list(pool: &PgPool, params: &ProductQuery) -> Result<Vec<Product>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_values: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if let Some(ref status) = params.status {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(status.clone());
        }

        if let Some(ref category) = params.category {
            conditions.push(format!("category = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(category.clone());
        }

        if let Some(ref search) = params.search {
            conditions.push(format!("name ILIKE ${bind_idx}"));
            let _ = bind_idx;
            bind_values.push(format!("%{search}%"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query =
            format!("SELECT {COLUMNS} FROM products {where_clause} ORDER BY created_at DESC");

        let mut q = sqlx::query_as::<_, Product>(&query);
        for val in &bind_values {
            q = q.bind(val.as_str());
        }
        q.fetch_all(pool).await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                status = COALESCE($5, status),
                image_url = COALESCE($6, image_url),
                description = COALESCE($7, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.status)
            .bind(&input.image_url)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Write a new stock value for a product. Ledger use only — callers must
    /// append a matching `stock_history` entry.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_stock(
        pool: &PgPool,
        id: DbId,
        new_stock: i32,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET stock = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(new_stock)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    ///
    /// Hard delete with no referential guard: existing order items keep
    /// their name/price snapshots and their `product_id` becomes NULL.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
