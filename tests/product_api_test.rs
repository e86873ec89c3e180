mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rstest::rstest;
use serde_json::json;

#[tokio::test]
async fn create_then_get_returns_the_same_product() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "  Widget ", "description": "Blue widget", "price": "10.00" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["description"], "Blue widget");
    assert_eq!(created["price"], "10.00");
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let response = app.request(Method::GET, "/api/v1/products/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched["name"], created["name"]);
    assert_eq!(fetched["description"], created["description"]);
    assert_eq!(fetched["price"], created["price"]);
}

#[tokio::test]
async fn numeric_prices_are_accepted() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Gadget", "price": 4.5 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response_json(response).await["price"], "4.50");
}

#[tokio::test]
async fn list_returns_products_in_id_order() {
    let app = TestApp::new().await;
    app.create_product("First", "1.00").await;
    app.create_product("Second", "2.00").await;

    let response = app.request(Method::GET, "/api/v1/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn list_is_empty_on_fresh_store() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/v1/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!([]));
}

#[rstest]
#[case(json!({ "name": "Widget", "price": "-1.00" }), "price")]
#[case(json!({ "name": "   ", "price": "1.00" }), "name")]
#[case(json!({ "name": "x".repeat(256), "price": "1.00" }), "name")]
#[case(json!({ "name": "Widget", "price": "1.001" }), "price")]
#[case(json!({ "name": "Widget", "description": "d".repeat(2001), "price": "1.00" }), "description")]
#[tokio::test]
async fn invalid_products_are_rejected_per_field(
    #[case] payload: serde_json::Value,
    #[case] field: &str,
) {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/api/v1/products", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(
        body["fields"][field].is_array(),
        "expected field error for {field}: {body}"
    );

    let list = response_json(app.request(Method::GET, "/api/v1/products", None).await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn missing_fields_and_bad_json_are_400_not_422() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/api/v1/products", Some(json!({ "name": "Widget" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["fields"]["price"], json!(["This field is required."]));
    assert!(body["fields"].get("body").is_none(), "{body}");

    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Widget", "price": 1e30 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["fields"]["price"].is_array(), "{body}");

    let response = app
        .request_raw(Method::POST, "/api/v1/products", "{\"name\": ")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_product_is_404() {
    let app = TestApp::new().await;

    for method in [Method::GET, Method::DELETE] {
        let response = app.request(method, "/api/v1/products/42", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = app
        .request(
            Method::PUT,
            "/api/v1/products/42",
            Some(json!({ "name": "Widget", "price": "1.00" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(
            Method::PATCH,
            "/api/v1/products/42",
            Some(json!({ "price": "2.00" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_replaces_every_field() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Widget", "description": "old", "price": "1.00" })),
        )
        .await;
    let created = response_json(response).await;

    let response = app
        .request(
            Method::PUT,
            "/api/v1/products/1",
            Some(json!({ "name": "Widget XL", "price": "12.50" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = response_json(response).await;
    assert_eq!(updated["name"], "Widget XL");
    assert_eq!(updated["description"], serde_json::Value::Null);
    assert_eq!(updated["price"], "12.50");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn put_with_invalid_body_keeps_product() {
    let app = TestApp::new().await;
    app.create_product("Widget", "3.00").await;

    let response = app
        .request(
            Method::PUT,
            "/api/v1/products/1",
            Some(json!({ "name": "Widget", "price": "-3.00" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = response_json(app.request(Method::GET, "/api/v1/products/1", None).await).await;
    assert_eq!(fetched["price"], "3.00");
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/v1/products",
        Some(json!({ "name": "Widget", "description": "blue", "price": "5.00" })),
    )
    .await;

    let response = app
        .request(
            Method::PATCH,
            "/api/v1/products/1",
            Some(json!({ "price": "6.00" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = response_json(response).await;
    assert_eq!(patched["name"], "Widget");
    assert_eq!(patched["description"], "blue");
    assert_eq!(patched["price"], "6.00");

    let response = app
        .request(
            Method::PATCH,
            "/api/v1/products/1",
            Some(json!({ "description": null })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["description"], serde_json::Value::Null);
}

#[tokio::test]
async fn patch_is_validated() {
    let app = TestApp::new().await;
    app.create_product("Widget", "5.00").await;

    let response = app
        .request(
            Method::PATCH,
            "/api/v1/products/1",
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response_json(response).await["fields"]["name"].is_array());
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = TestApp::new().await;
    app.create_product("Widget", "5.00").await;

    let response = app.request(Method::DELETE, "/api/v1/products/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, serde_json::Value::Null);

    let response = app.request(Method::GET, "/api/v1/products/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request(Method::DELETE, "/api/v1/products/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_product_with_transactions_conflicts() {
    let app = TestApp::new().await;
    app.create_product("Widget", "5.00").await;
    let response = app.record("sales", 1, 1, "2024-03-01").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.request(Method::DELETE, "/api/v1/products/1", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(response_json(response).await["error"], "Conflict");

    let response = app.request(Method::GET, "/api/v1/products/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
