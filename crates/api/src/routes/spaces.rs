//! Route definitions for the `/spaces` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::spaces;
use crate::state::AppState;

/// Routes mounted at `/spaces`.
///
/// ```text
/// GET    /                 -> search
/// POST   /                 -> create (multipart)
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update (multipart)
/// DELETE /{id}             -> delete
/// POST   /{id}/publish     -> publish
/// POST   /{id}/pause       -> pause
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(spaces::search).post(spaces::create))
        .route(
            "/{id}",
            get(spaces::get_by_id)
                .put(spaces::update)
                .delete(spaces::delete),
        )
        .route("/{id}/publish", post(spaces::publish))
        .route("/{id}/pause", post(spaces::pause))
}
