#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use nzwalks_api::auth::jwt::{generate_access_token, JwtConfig};
use nzwalks_api::config::ServerConfig;
use nzwalks_api::router::build_app_router;
use nzwalks_api::state::AppState;
use nzwalks_api::storage::LocalObjectStore;
use nzwalks_db::repositories::MemoryStore;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PUBLIC_BASE_URL: &str = "http://walks.test";

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        issuer: "nzwalks-api".to_string(),
        audience: "nzwalks-api".to_string(),
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(images_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        images_dir,
        public_base_url: PUBLIC_BASE_URL.to_string(),
        max_upload_body_bytes: 32 * 1024 * 1024,
        jwt: test_jwt(),
    }
}

/// The application on a seeded in-memory store, plus the directory uploads
/// are written to. The directory is removed when this is dropped.
pub struct TestApp {
    pub router: Router,
    pub images: TempDir,
}

/// Build the full application router with all middleware layers.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app() -> TestApp {
    let images = tempfile::tempdir().expect("temp dir");
    let config = test_config(images.path().to_path_buf());

    let store = Arc::new(MemoryStore::seeded());
    let object_store = Arc::new(LocalObjectStore::new(
        config.images_dir.clone(),
        config.public_base_url.clone(),
    ));
    let state = AppState::new(config.clone(), store.clone(), store, object_store)
        .expect("mappers build");

    TestApp {
        router: build_app_router(state, &config),
        images,
    }
}

pub fn token_with_roles(roles: &[&str]) -> String {
    generate_access_token(
        "tester@example.com",
        roles,
        chrono::Duration::minutes(15),
        &test_jwt(),
    )
    .expect("token")
}

pub fn reader_token() -> String {
    token_with_roles(&["Reader"])
}

pub fn writer_token() -> String {
    token_with_roles(&["Writer"])
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    json: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match json {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, token: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(json)).await
}

pub async fn put_json(app: &Router, uri: &str, token: &str, json: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(json)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a raw request body with an explicit content type.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: &str,
    content_type: &str,
    body: Vec<u8>,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
