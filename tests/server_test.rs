mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{response_json, TestApp};

#[tokio::test]
async fn health_endpoints_report_up() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["details"]["database"]["status"], "up");

    let response = app.request(Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["ready"], true);

    let response = app.request(Method::GET, "/health/live", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["alive"], true);
}

#[tokio::test]
async fn request_id_is_echoed_and_reported_in_errors() {
    let app = TestApp::new().await;

    let request = Request::get("/api/v1/products/5")
        .header("x-request-id", "it-req-1")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "it-req-1");
    assert_eq!(response_json(response).await["request_id"], "it-req-1");
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/products", None).await;
    let header = response
        .headers()
        .get("x-request-id")
        .expect("request id header")
        .to_str()
        .unwrap();
    assert!(!header.is_empty());
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/products")
        .header("origin", "https://shop.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = response_json(response).await;
    assert!(doc["paths"]["/api/v1/products"].is_object());
    assert!(doc["paths"]["/api/v1/inventory"]["get"].is_object());
}

#[tokio::test]
async fn unknown_routes_get_json_404() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["error"], "Not Found");
}
