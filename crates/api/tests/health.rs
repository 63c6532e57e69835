mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, request, TestApp};

#[tokio::test]
async fn health_reports_ok_with_memory_store() {
    let app = TestApp::new();

    let response = app.send(request(Method::GET, "/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new();

    let response = app.send(request(Method::GET, "/health", None)).await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = TestApp::new();

    let response = app
        .send(request(Method::GET, "/api/v1/admin/nonexistent", None))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
