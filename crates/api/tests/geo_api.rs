//! Integration tests for the geo autocomplete endpoints.
//!
//! The test app starts with an empty cache (no outbound Georef call), so
//! these cover the degraded path; cache population is unit tested in
//! `venia_api::geo`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn provinces_with_empty_cache_returns_empty_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/geo/provinces").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_province_returns_empty_city_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/geo/provinces/Mendoza/cities").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!([]));
}
