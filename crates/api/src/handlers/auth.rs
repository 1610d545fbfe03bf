//! Handlers for the `/auth` resource (login, refresh, logout, me).

use abcpos_core::error::CoreError;
use abcpos_core::types::DbId;
use abcpos_db::models::session::CreateSession;
use abcpos_db::models::user::UserProfile;
use abcpos_db::repositories::{SessionRepo, UserRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Account status required for login; anything else is rejected.
const STATUS_ACTIVE: &str = "active";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find account by email.
    let user = UserRepo::find_account_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Reject inactive accounts before checking the password.
    if user.status != STATUS_ACTIVE {
        return Err(AppError::Core(CoreError::Forbidden(
            "Your account is inactive. Please contact an administrator.".into(),
        )));
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 4. Generate tokens and create session.
    let response = create_auth_response(
        &state,
        user.id,
        &user.email,
        &user.username,
        user.full_name.as_deref(),
        &user.role,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find matching active session.
    let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 4. The user must still exist and be active.
    let profile = UserRepo::find_profile_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if profile.status != STATUS_ACTIVE {
        return Err(AppError::Core(CoreError::Forbidden(
            "Your account is inactive. Please contact an administrator.".into(),
        )));
    }

    // 5. Generate new tokens and create new session.
    let response = create_auth_response(
        &state,
        profile.id,
        &profile.email,
        &profile.username,
        profile.full_name.as_deref(),
        &profile.role,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's profile.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = UserRepo::find_profile_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        })?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    email: &str,
    username: &str,
    full_name: Option<&str>,
    role: &str,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user_id, username, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: user_id,
            email: email.to_string(),
            username: username.to_string(),
            full_name: full_name.map(|s| s.to_string()),
            role: role.to_string(),
        },
    })
}
