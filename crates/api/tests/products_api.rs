//! Integration tests for the product catalog and the stock ledger.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_auth, request_json, seed_product, staff_token, wait_for_audit_rows};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_product_applies_defaults(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = request_json(
        app,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        json!({"name": "Iced Latte", "price": 120.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Iced Latte");
    assert_eq!(json["data"]["price"], 120.0);
    assert_eq!(json["data"]["stock"], 0);
    assert_eq!(json["data"]["status"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_product_rejects_empty_name_and_negative_price(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let empty_name = request_json(
        app.clone(),
        Method::POST,
        "/api/v1/products",
        Some(&token),
        json!({"name": "", "price": 10.0}),
    )
    .await;
    assert_eq!(empty_name.status(), StatusCode::BAD_REQUEST);

    let negative_price = request_json(
        app,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        json!({"name": "Bad", "price": -1.0}),
    )
    .await;
    assert_eq!(negative_price.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_product_cannot_touch_stock(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let product_id = seed_product(&pool, "Brownie", 60.0, 7).await;
    let app = common::build_test_app(pool);

    // A stray "stock" field in the update body is ignored.
    let response = request_json(
        app,
        Method::PUT,
        &format!("/api/v1/products/{product_id}"),
        Some(&token),
        json!({"price": 65.0, "stock": 999}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], 65.0);
    assert_eq!(json["data"]["stock"], 7, "stock only changes via the ledger");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_product_returns_404(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/products/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_products_filters_by_search(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    seed_product(&pool, "Iced Latte", 120.0, 5).await;
    seed_product(&pool, "Hot Chocolate", 90.0, 5).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/products?search=latte", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Iced Latte");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_product_nulls_order_item_references(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let product_id = seed_product(&pool, "Doomed", 10.0, 3).await;
    let app = common::build_test_app(pool.clone());

    // Place an order referencing the product, then delete the product.
    let order = request_json(
        app.clone(),
        Method::POST,
        "/api/v1/orders",
        Some(&token),
        json!({"items": [
            {"product_id": product_id, "product_name": "Doomed", "quantity": 1, "unit_price": 10.0}
        ]}),
    )
    .await;
    assert_eq!(order.status(), StatusCode::CREATED);

    let deleted = request_json(
        app,
        Method::DELETE,
        &format!("/api/v1/products/{product_id}"),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // The order item survives with its snapshot; the FK is nulled.
    let (name, fk): (String, Option<i64>) = sqlx::query_as(
        "SELECT product_name, product_id FROM order_items WHERE product_name = 'Doomed'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(name, "Doomed");
    assert_eq!(fk, None);
}

// ---------------------------------------------------------------------------
// Stock ledger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_stock_writes_value_and_ledger_entry(pool: PgPool) {
    let (user_id, token) = staff_token(&pool).await;
    let product_id = seed_product(&pool, "Muffin", 45.0, 10).await;
    let app = common::build_test_app(pool.clone());

    let response = request_json(
        app.clone(),
        Method::PUT,
        &format!("/api/v1/products/{product_id}/stock"),
        Some(&token),
        json!({"new_stock": 25, "change_type": "increase", "reason": "Restock delivery"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["stock"], 25);

    let history = get_auth(
        app,
        &format!("/api/v1/products/{product_id}/stock-history"),
        &token,
    )
    .await;
    let history_json = body_json(history).await;
    let entries = history_json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["previous_stock"], 10);
    assert_eq!(entries[0]["new_stock"], 25);
    assert_eq!(entries[0]["change_amount"], 15);
    assert_eq!(entries[0]["change_type"], "increase");
    assert_eq!(entries[0]["reason"], "Restock delivery");
    assert_eq!(entries[0]["created_by"].as_i64().unwrap(), user_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_stock_on_unknown_product_returns_404(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = request_json(
        app,
        Method::PUT,
        "/api/v1/products/424242/stock",
        Some(&token),
        json!({"new_stock": 5}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn omitted_change_type_is_derived_from_delta(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let product_id = seed_product(&pool, "Scone", 35.0, 10).await;
    let app = common::build_test_app(pool);

    // Down to 4, then up to 9, without naming a change type.
    for new_stock in [4, 9] {
        let response = request_json(
            app.clone(),
            Method::PUT,
            &format!("/api/v1/products/{product_id}/stock"),
            Some(&token),
            json!({"new_stock": new_stock}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let history = get_auth(
        app,
        &format!("/api/v1/products/{product_id}/stock-history"),
        &token,
    )
    .await;
    let history_json = body_json(history).await;
    let entries = history_json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first: 4 -> 9 is an increase, 10 -> 4 a decrease.
    assert_eq!(entries[0]["change_type"], "increase");
    assert_eq!(entries[1]["change_type"], "decrease");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ledger_outage_does_not_fail_the_adjustment(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let product_id = seed_product(&pool, "Bagel", 30.0, 10).await;

    // Simulate a broken ledger store. The stock write must still succeed.
    sqlx::query("DROP TABLE stock_history CASCADE")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());

    let response = request_json(
        app,
        Method::PUT,
        &format!("/api/v1/products/{product_id}/stock"),
        Some(&token),
        json!({"new_stock": 25}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["stock"], 25);

    let stock: i32 = sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stock, 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stock_history_is_newest_first(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;
    let product_id = seed_product(&pool, "Cookie", 25.0, 0).await;
    let app = common::build_test_app(pool.clone());

    for new_stock in [10, 8, 20] {
        let response = request_json(
            app.clone(),
            Method::PUT,
            &format!("/api/v1/products/{product_id}/stock"),
            Some(&token),
            json!({"new_stock": new_stock}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let history = get_auth(
        app,
        &format!("/api/v1/products/{product_id}/stock-history"),
        &token,
    )
    .await;
    let history_json = body_json(history).await;
    let entries = history_json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["new_stock"], 20, "latest entry first");
    assert_eq!(entries[2]["new_stock"], 10);
}

// ---------------------------------------------------------------------------
// Audit behaviour
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_crud_is_audited(pool: PgPool) {
    let (user_id, token) = staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let created = request_json(
        app.clone(),
        Method::POST,
        "/api/v1/products",
        Some(&token),
        json!({"name": "Audited", "price": 10.0}),
    )
    .await;
    let created_json = body_json(created).await;
    let product_id = created_json["data"]["id"].as_i64().unwrap();

    request_json(
        app.clone(),
        Method::PUT,
        &format!("/api/v1/products/{product_id}"),
        Some(&token),
        json!({"price": 12.0}),
    )
    .await;

    request_json(
        app,
        Method::DELETE,
        &format!("/api/v1/products/{product_id}"),
        Some(&token),
        json!({}),
    )
    .await;

    wait_for_audit_rows(&pool, "products", 3).await;

    let rows: Vec<(String, Option<i64>, Option<String>)> = sqlx::query_as(
        "SELECT action, user_id, username FROM audit_logs \
         WHERE table_name = 'products' ORDER BY id",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows[0].0, "CREATE");
    assert_eq!(rows[1].0, "UPDATE");
    assert_eq!(rows[2].0, "DELETE");
    for (_, uid, username) in &rows {
        assert_eq!(uid.unwrap(), user_id);
        assert_eq!(username.as_deref(), Some("staff"));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_outage_is_invisible_to_callers(pool: PgPool) {
    let (_id, token) = staff_token(&pool).await;

    // Simulate a broken audit store. Writes must still succeed.
    sqlx::query("DROP TABLE audit_logs CASCADE")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);

    let response = request_json(
        app,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        json!({"name": "Unaudited", "price": 5.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}
