//! HTTP-level integration tests for the spaces resource: multipart create
//! and update, the publish gate, gallery reconciliation and the address
//! visibility policy.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{body_json, delete, get, post, post_json, send_multipart, PNG_MAGIC};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_draft_space_returns_201(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;

    let app = common::build_test_app(pool);
    let response = send_multipart(
        app,
        Method::POST,
        &format!("/api/v1/spaces?owner_id={owner}"),
        serde_json::json!({"name": "Salon Central", "amenities": "wifi,parking"}),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Salon Central");
    assert_eq!(json["status"], "draft");
    assert_eq!(json["config"]["pricing_unit"], "hour");
    assert_eq!(json["amenities"], serde_json::json!(["wifi", "parking"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_uploads_gallery_in_image_order(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;

    let app = common::build_test_app(pool);
    let response = send_multipart(
        app,
        Method::POST,
        &format!("/api/v1/spaces?owner_id={owner}"),
        serde_json::json!({
            "name": "Galeria",
            "image_order": ["b.png", "a.png"]
        }),
        &[("a.png", PNG_MAGIC), ("b.png", PNG_MAGIC)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(
        json["images"],
        serde_json::json!(["http://images.test/b.png", "http://images.test/a.png"])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_non_image_upload(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;

    let app = common::build_test_app(pool);
    let response = send_multipart(
        app,
        Method::POST,
        &format!("/api/v1/spaces?owner_id={owner}"),
        serde_json::json!({"name": "Bad Upload"}),
        &[("malware.png", b"<html>not an image</html>")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_published_without_price_returns_400(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;

    let app = common::build_test_app(pool);
    let response = send_multipart(
        app,
        Method::POST,
        &format!("/api/v1/spaces?owner_id={owner}"),
        serde_json::json!({
            "name": "No Price",
            "status": "published",
            "max_capacity": 10
        }),
        &[("a.png", PNG_MAGIC)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_unknown_owner_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/spaces?owner_id=999999",
        serde_json::json!({"name": "Orphan"}),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Publish gate and status transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_gate_requires_price_capacity_and_image(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let space = common::seed_space(
        &pool,
        owner,
        serde_json::json!({"name": "Almost Ready", "base_price": 8000, "max_capacity": 15}),
    )
    .await;

    // No gallery yet: publishing fails.
    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{}/publish?owner_id={owner}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    common::seed_gallery(&pool, space.id, 1).await;

    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{}/publish?owner_id={owner}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "published");

    // Pausing takes it off the catalog.
    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/spaces/{}/pause?owner_id={owner}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "paused");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_mismatch_returns_403(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let stranger = common::seed_user(&pool, "stranger@example.com").await;
    let space = common::seed_space(
        &pool,
        owner,
        serde_json::json!({"name": "Mine", "base_price": 1000, "max_capacity": 5}),
    )
    .await;
    common::seed_gallery(&pool, space.id, 1).await;

    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{}/publish?owner_id={stranger}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/spaces/{}?owner_id={stranger}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn partial_update_preserves_unset_fields(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let space = common::seed_space(
        &pool,
        owner,
        serde_json::json!({"name": "Original Name", "base_price": 2000}),
    )
    .await;

    let response = send_multipart(
        common::build_test_app(pool),
        Method::PUT,
        &format!("/api/v1/spaces/{}?owner_id={owner}", space.id),
        serde_json::json!({"description": "Now with a description"}),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Original Name");
    assert_eq!(json["base_price"], "2000");
    assert_eq!(json["description"], "Now with a description");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_rebuilds_gallery_from_image_order(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let space = common::seed_space(&pool, owner, serde_json::json!({"name": "Gallery"})).await;
    common::seed_gallery(&pool, space.id, 2).await;
    let kept = format!("http://images.test/seed-{}-1.png", space.id);

    // Keep only the second existing image, then a fresh upload.
    let response = send_multipart(
        common::build_test_app(pool),
        Method::PUT,
        &format!("/api/v1/spaces/{}?owner_id={owner}", space.id),
        serde_json::json!({"image_order": [kept, "new.png"]}),
        &[("new.png", PNG_MAGIC)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["images"],
        serde_json::json!([kept, "http://images.test/new.png"])
    );
}

// ---------------------------------------------------------------------------
// Detail and address visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn approximate_visibility_hides_address_for_non_owners(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let space = common::seed_space(
        &pool,
        owner,
        serde_json::json!({
            "name": "Hidden Address",
            "address": "Calle Falsa 123",
            "location_hint": "timbre rojo",
            "place_ref": "place-abc",
            "latitude": -34.6037,
            "longitude": -58.3816,
            "address_visibility": "approximate"
        }),
    )
    .await;

    // Anonymous viewer: address fields hidden, coordinates jittered.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["address"].is_null());
    assert!(json["config"]["location_hint"].is_null());
    assert!(json["config"]["place_ref"].is_null());
    let lat = json["config"]["latitude"].as_f64().unwrap();
    assert!((lat - (-34.6037)).abs() <= 0.002);

    // The owner sees everything untouched.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/spaces/{}?requester_id={owner}", space.id),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["address"], "Calle Falsa 123");
    assert_eq!(json["config"]["latitude"].as_f64().unwrap(), -34.6037);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_space_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/spaces/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_the_space(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let space = common::seed_space(&pool, owner, serde_json::json!({"name": "Short Lived"})).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/spaces/{}?owner_id={owner}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/spaces/{}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_with_reservations_returns_409(pool: PgPool) {
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let booker = common::seed_user(&pool, "booker@example.com").await;
    let space = common::seed_space(
        &pool,
        owner,
        serde_json::json!({
            "name": "Booked Hall",
            "base_price": 5000,
            "pricing_unit": "hour",
            "status": "published"
        }),
    )
    .await;

    let start = Utc::now() + Duration::days(7);
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/reservations",
        serde_json::json!({
            "space_id": space.id,
            "user_id": booker,
            "starts_at": start.to_rfc3339(),
            "ends_at": (start + Duration::hours(2)).to_rfc3339()
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Reservation history keeps the space alive.
    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/spaces/{}?owner_id={owner}", space.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}
