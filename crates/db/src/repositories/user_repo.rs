//! Repository for the `user_profiles` table.

use abcpos_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUserAccount, UpdateUserProfile, UserAccount, UserProfile};

/// Column list for full account rows (includes the password hash).
const ACCOUNT_COLUMNS: &str = "\
    id, email, username, full_name, role, status, password_hash, created_at, updated_at";

/// Column list for the public profile projection.
const PROFILE_COLUMNS: &str =
    "id, email, username, full_name, role, status, created_at, updated_at";

/// Provides account lookup and profile CRUD for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a full account row (with password hash) by email. Used by login.
    pub async fn find_account_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM user_profiles WHERE email = $1");
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a public profile by user ID.
    pub async fn find_profile_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles, newest first.
    pub async fn list_profiles(pool: &PgPool) -> Result<Vec<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles ORDER BY created_at DESC");
        sqlx::query_as::<_, UserProfile>(&query).fetch_all(pool).await
    }

    /// Insert a new user account, returning the public profile projection.
    ///
    /// If omitted, `role` defaults to `staff`; status starts `active`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUserAccount,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (email, username, full_name, role, password_hash)
             VALUES ($1, $2, $3, COALESCE($4, 'staff'), $5)
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET
                username = COALESCE($2, username),
                full_name = COALESCE($3, full_name),
                role = COALESCE($4, role),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }
}
