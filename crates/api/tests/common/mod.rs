#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use homeopathway_api::auth::jwt::{generate_access_token, JwtConfig};
use homeopathway_api::config::ServerConfig;
use homeopathway_api::progress::ProgressStore;
use homeopathway_api::router::build_app_router;
use homeopathway_api::state::AppState;
use homeopathway_core::roles::ROLE_ADMIN;
use homeopathway_core::spreadsheet::{self, SheetData};
use homeopathway_core::types::EntityId;
use homeopathway_db::store::{CatalogStore, MemoryCatalogStore};

const BOUNDARY: &str = "homeopathway-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The full application wired to an in-memory catalog.
///
/// The store and progress map are shared with the router so tests can seed
/// data and inspect import state directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCatalogStore>,
    pub progress: Arc<ProgressStore>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(test_config(), |store| store as Arc<dyn CatalogStore>)
    }

    /// Build with a custom config, serving requests through the store that
    /// `wrap` derives from the shared in-memory catalog.
    pub fn build(
        config: ServerConfig,
        wrap: impl FnOnce(Arc<MemoryCatalogStore>) -> Arc<dyn CatalogStore>,
    ) -> Self {
        let store = Arc::new(MemoryCatalogStore::new());
        let progress = Arc::new(ProgressStore::new());

        let state = AppState {
            store: wrap(store.clone()),
            config: Arc::new(config.clone()),
            progress: progress.clone(),
        };

        Self {
            router: build_app_router(state, &config),
            store,
            progress,
            config,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// A valid bearer token for a user with `role`.
    pub fn token_for(&self, role: &str) -> String {
        generate_access_token(EntityId::new_v4(), role, &self.config.jwt).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ROLE_ADMIN)
    }
}

/// Encode `sheets` into an XLSX document.
pub fn workbook(sheets: Vec<SheetData>) -> Vec<u8> {
    spreadsheet::encode(&sheets).unwrap()
}

/// Build a multipart body holding a single file field.
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A multipart body with a plain text field and no file.
pub fn empty_multipart_body() -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"comment\"\r\n\r\n\
         no attachment\r\n\
         --{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

/// POST a multipart body to `uri`, optionally authenticated.
pub fn upload_request(uri: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

/// A body-less request, optionally authenticated.
pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
