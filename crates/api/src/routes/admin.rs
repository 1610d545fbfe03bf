//! Route definitions for admin user management.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/admin/users`. All handlers enforce the admin role.
///
/// ```text
/// GET  /        -> list profiles
/// POST /        -> create account
/// PUT  /{id}    -> update profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", put(users::update_user))
}
