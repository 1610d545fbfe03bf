//! Integration tests for audit trail queries.

mod common;

use axum::http::{Method, StatusCode};
use common::{admin_token, body_json, get_auth, request_json, staff_token, wait_for_audit_rows};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_query_requires_admin(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/audit-logs", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_query_filters_by_table_name(pool: PgPool) {
    let (admin_id, token) = admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    // Generate one products entry and one user_profiles entry.
    let created = request_json(
        app.clone(),
        Method::POST,
        "/api/v1/products",
        Some(&token),
        json!({"name": "Traced", "price": 9.0}),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let updated = request_json(
        app.clone(),
        Method::PUT,
        &format!("/api/v1/admin/users/{admin_id}"),
        Some(&token),
        json!({"full_name": "Administrator"}),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    wait_for_audit_rows(&pool, "products", 1).await;
    wait_for_audit_rows(&pool, "user_profiles", 1).await;

    let response = get_auth(
        app,
        "/api/v1/admin/audit-logs?table_name=products",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 1);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["table_name"], "products");
    assert_eq!(items[0]["action"], "CREATE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_query_paginates(pool: PgPool) {
    let (_admin_id, token) = admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    for i in 0..3 {
        let response = request_json(
            app.clone(),
            Method::POST,
            "/api/v1/products",
            Some(&token),
            json!({"name": format!("Product {i}"), "price": 1.0}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    wait_for_audit_rows(&pool, "products", 3).await;

    let response = get_auth(
        app,
        "/api/v1/admin/audit-logs?table_name=products&limit=2&offset=1",
        &token,
    )
    .await;
    let body = body_json(response).await;

    // total counts all matches; items honour limit/offset.
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_pagination_is_clamped(pool: PgPool) {
    let (_admin_id, token) = admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = request_json(
        app.clone(),
        Method::POST,
        "/api/v1/products",
        Some(&token),
        json!({"name": "Clamped", "price": 2.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    wait_for_audit_rows(&pool, "products", 1).await;

    // Negative limit/offset must not reach Postgres as-is.
    let response = get_auth(
        app,
        "/api/v1/admin/audit-logs?limit=-5&offset=-1",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 1);
    // limit clamps to zero, so the page itself is empty.
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_snapshots_redact_sensitive_fields(pool: PgPool) {
    let (_admin_id, token) = admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let created = request_json(
        app,
        Method::POST,
        "/api/v1/admin/users",
        Some(&token),
        json!({
            "email": "fresh@abcpos.test",
            "username": "fresh",
            "password": "long-enough-password"
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    wait_for_audit_rows(&pool, "user_profiles", 1).await;

    let new_values: serde_json::Value = sqlx::query_scalar(
        "SELECT new_values FROM audit_logs WHERE table_name = 'user_profiles'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    // The profile snapshot must not carry credential material.
    assert_eq!(new_values["email"], "fresh@abcpos.test");
    assert!(
        new_values.get("password_hash").is_none()
            || new_values["password_hash"] == "[REDACTED]",
        "password material must never be stored in audit snapshots"
    );
}
