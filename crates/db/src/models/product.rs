//! Product entity model and DTOs.

use abcpos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row from the `products` table.
///
/// `stock` is expected to stay non-negative but this is not enforced; the
/// column must only be mutated through the stock ledger (product update
/// DTOs deliberately have no stock field).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub status: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    /// Defaults to 0 if omitted.
    pub stock: Option<i32>,
    /// Defaults to `active` if omitted.
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
}

/// DTO for updating an existing product. All fields are optional; stock is
/// intentionally absent (use the stock ledger instead).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Filter parameters for product listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
}
