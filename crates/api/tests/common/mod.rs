//! Shared helpers for API integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use venia_api::config::ServerConfig;
use venia_api::geo::GeoCache;
use venia_api::images::{ImageStore, ImageStoreError};
use venia_api::router::build_app_router;
use venia_api::state::AppState;
use venia_db::models::space::{CreateSpace, Space};
use venia_db::models::user::CreateUser;
use venia_db::repositories::{SpaceImageRepo, SpaceRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        georef_url: "http://georef.invalid".to_string(),
        image_store_url: "http://images.test".to_string(),
    }
}

/// Image store that persists nothing and mints deterministic URLs from the
/// uploaded file name.
pub struct StubImageStore;

#[async_trait::async_trait]
impl ImageStore for StubImageStore {
    async fn upload(&self, filename: &str, _bytes: &[u8]) -> Result<String, ImageStoreError> {
        Ok(format!("http://images.test/{filename}"))
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. The geo cache starts empty and the
/// image store is stubbed.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        geo: Arc::new(GeoCache::empty()),
        images: Arc::new(StubImageStore),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a multipart request with a `data` JSON part and optional file parts.
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    data: serde_json::Value,
    files: &[(&str, &[u8])],
) -> Response<Body> {
    const BOUNDARY: &str = "test-boundary-7cd1b6a0";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"data\"\r\n\r\n");
    body.extend_from_slice(data.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    for (filename, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"images\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers (direct repository access)
// ---------------------------------------------------------------------------

/// Minimal valid PNG header for upload tests.
pub const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    let input: CreateUser = serde_json::from_value(serde_json::json!({
        "first_name": "Test",
        "last_name": "User",
        "email": email,
    }))
    .unwrap();
    UserRepo::create(pool, &input).await.unwrap().id
}

/// Create a space directly through the repository. `overrides` is the
/// `CreateSpace` JSON; a name must be provided.
pub async fn seed_space(pool: &PgPool, owner_id: i64, overrides: serde_json::Value) -> Space {
    let input: CreateSpace = serde_json::from_value(overrides).unwrap();
    SpaceRepo::create(pool, owner_id, &input).await.unwrap()
}

/// Attach `count` placeholder gallery images to a space.
pub async fn seed_gallery(pool: &PgPool, space_id: i64, count: usize) {
    let urls: Vec<String> = (0..count)
        .map(|i| format!("http://images.test/seed-{space_id}-{i}.png"))
        .collect();
    SpaceImageRepo::replace_gallery(pool, space_id, &urls)
        .await
        .unwrap();
}
