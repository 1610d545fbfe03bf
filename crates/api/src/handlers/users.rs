//! Handlers for user management under `/admin/users`. All endpoints
//! require the admin role.

use abcpos_core::audit::{actions, tables};
use abcpos_core::error::CoreError;
use abcpos_core::types::DbId;
use abcpos_db::models::user::{CreateUserAccount, UpdateUserProfile, UserProfile};
use abcpos_db::repositories::UserRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::audit::AuditEvent;
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum accepted password length for new accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    pub full_name: Option<String>,
    /// Defaults to `staff` if omitted.
    pub role: Option<String>,
    pub password: String,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserProfile>>>> {
    let users = UserRepo::list_profiles(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserProfile>>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUserAccount {
        email: input.email,
        username: input.username,
        full_name: input.full_name,
        role: input.role,
        password_hash,
    };
    let profile = UserRepo::create(&state.pool, &create).await?;

    state.audit.record(
        &admin.actor(),
        AuditEvent {
            action: actions::CREATE,
            table_name: tables::USER_PROFILES,
            record_id: Some(profile.id),
            old_values: None,
            new_values: serde_json::to_value(&profile).ok(),
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a profile (username, full name, role, status). The audit entry
/// records only the resulting row, not a before snapshot.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = UserRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "user", id })?;

    state.audit.record(
        &admin.actor(),
        AuditEvent {
            action: actions::UPDATE,
            table_name: tables::USER_PROFILES,
            record_id: Some(profile.id),
            old_values: None,
            new_values: serde_json::to_value(&profile).ok(),
        },
    );

    Ok(Json(DataResponse { data: profile }))
}
