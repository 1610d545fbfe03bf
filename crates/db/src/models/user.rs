//! User profile entity models and DTOs.

use abcpos_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full user row including the password hash. Never serialized — handlers
/// return [`UserProfile`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct UserAccount {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: String,
    pub status: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection of a user row, safe to serialize.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user account (admin only). The password arrives in
/// plaintext at the handler and is hashed before this DTO is built.
#[derive(Debug, Clone)]
pub struct CreateUserAccount {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    /// Defaults to `staff` if omitted.
    pub role: Option<String>,
    pub password_hash: String,
}

/// DTO for updating a user profile. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserProfile {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}
