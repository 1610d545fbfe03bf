#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use abcpos_api::audit::AuditRecorder;
use abcpos_api::auth::jwt::{generate_access_token, JwtConfig};
use abcpos_api::auth::password::hash_password;
use abcpos_api::config::ServerConfig;
use abcpos_api::routes;
use abcpos_api::state::AppState;
use abcpos_api::storage::MediaStore;
use abcpos_core::types::DbId;

/// JWT secret shared between the test config and token helpers.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Password used for all seeded test accounts.
pub const TEST_PASSWORD: &str = "password123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: std::env::temp_dir().join("abcpos-test-media"),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let media = Arc::new(MediaStore::new(config.media_root.clone()));
    std::fs::create_dir_all(&config.media_root).expect("media root should be creatable");

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        audit: AuditRecorder::new(pool),
        media,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .nest_service("/media", ServeDir::new(&config.media_root))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send an authenticated GET request.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON request, optionally authenticated.
pub async fn request_json(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed and token helpers
// ---------------------------------------------------------------------------

/// Insert a user account with [`TEST_PASSWORD`], returning its id.
pub async fn seed_user(pool: &PgPool, email: &str, username: &str, role: &str) -> DbId {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    sqlx::query_scalar::<_, DbId>(
        "INSERT INTO user_profiles (email, username, role, password_hash)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(email)
    .bind(username)
    .bind(role)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .expect("user insert should succeed")
}

/// Insert a product, returning its id.
pub async fn seed_product(pool: &PgPool, name: &str, price: f64, stock: i32) -> DbId {
    sqlx::query_scalar::<_, DbId>(
        "INSERT INTO products (name, price, stock) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(stock)
    .fetch_one(pool)
    .await
    .expect("product insert should succeed")
}

/// Mint an access token signed with the test secret.
pub fn token_for(user_id: DbId, username: &str, role: &str) -> String {
    let config = test_config();
    generate_access_token(user_id, username, role, &config.jwt)
        .expect("token generation should succeed")
}

/// Seed a staff user and return `(user_id, token)`.
pub async fn staff_token(pool: &PgPool) -> (DbId, String) {
    let id = seed_user(pool, "staff@abcpos.test", "staff", "staff").await;
    let token = token_for(id, "staff", "staff");
    (id, token)
}

/// Seed an admin user and return `(user_id, token)`.
pub async fn admin_token(pool: &PgPool) -> (DbId, String) {
    let id = seed_user(pool, "admin@abcpos.test", "admin", "admin").await;
    let token = token_for(id, "admin", "admin");
    (id, token)
}

// ---------------------------------------------------------------------------
// Audit polling
// ---------------------------------------------------------------------------

/// Wait until at least `min_rows` audit entries exist for `table_name`.
///
/// Audit inserts run on detached tasks, so tests must poll rather than
/// assert immediately. Panics after ~5 seconds without the expected rows.
pub async fn wait_for_audit_rows(pool: &PgPool, table_name: &str, min_rows: i64) -> i64 {
    for _ in 0..50 {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM audit_logs WHERE table_name = $1",
        )
        .bind(table_name)
        .fetch_one(pool)
        .await
        .expect("audit count should succeed");

        if count >= min_rows {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("expected at least {min_rows} audit rows for {table_name}");
}
