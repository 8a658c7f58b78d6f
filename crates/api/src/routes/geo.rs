//! Route definitions for the `/geo` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::geo;
use crate::state::AppState;

/// Routes mounted at `/geo`.
///
/// ```text
/// GET    /provinces                        -> provinces
/// GET    /provinces/{province}/cities      -> cities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/provinces", get(geo::provinces))
        .route("/provinces/{province}/cities", get(geo::cities))
}
