//! Integration tests for `/api/v1/admin/import/progress`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, request, TestApp};
use homeopathway_core::import::ImportStatus;

const PROGRESS: &str = "/api/v1/admin/import/progress";

#[tokio::test]
async fn stored_progress_is_returned_without_auth() {
    let app = TestApp::new();
    app.progress.set_progress("abc", 42.0).await;

    let response = app
        .send(request(Method::GET, &format!("{PROGRESS}?importId=abc"), None))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["progress"], 42);
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn unknown_id_reads_as_idle_zero() {
    let app = TestApp::new();

    let response = app
        .send(request(Method::GET, &format!("{PROGRESS}?importId=nope"), None))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "progress": 0, "status": "idle" })
    );
}

#[tokio::test]
async fn missing_id_never_fails() {
    let app = TestApp::new();
    app.progress.set_progress("abc", 70.0).await;

    for uri in [PROGRESS.to_string(), format!("{PROGRESS}?importId=")] {
        let response = app.send(request(Method::GET, &uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["progress"], 0);
    }
}

#[tokio::test]
async fn admin_can_clear_progress() {
    let app = TestApp::new();
    let token = app.admin_token();
    app.progress.set_progress("done", 100.0).await;
    app.progress
        .set_status("done", ImportStatus::Complete)
        .await;

    let response = app
        .send(request(
            Method::DELETE,
            &format!("{PROGRESS}?importId=done"),
            Some(&token),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.progress.get_progress("done").await, 0);
    assert!(app.progress.is_empty().await);
}

#[tokio::test]
async fn clearing_requires_auth() {
    let app = TestApp::new();
    app.progress.set_progress("keep", 10.0).await;

    let response = app
        .send(request(
            Method::DELETE,
            &format!("{PROGRESS}?importId=keep"),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.progress.get_progress("keep").await, 10);
}
