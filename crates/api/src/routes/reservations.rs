//! Route definitions for the `/reservations` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Routes mounted at `/reservations`.
///
/// ```text
/// POST   /                        -> create
/// PATCH  /{id}/cancel             -> cancel
/// GET    /user/{user_id}          -> list_for_user
/// GET    /space/{space_id}        -> list_for_space (owner only)
/// GET    /occupied/{space_id}     -> occupied
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservations::create))
        .route("/{id}/cancel", patch(reservations::cancel))
        .route("/user/{user_id}", get(reservations::list_for_user))
        .route("/space/{space_id}", get(reservations::list_for_space))
        .route("/occupied/{space_id}", get(reservations::occupied))
}
