//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// POST   /{id}/avatar     -> upload_avatar (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/{id}", get(users::get_by_id).put(users::update))
        .route("/{id}/avatar", post(users::upload_avatar))
}
