//! Handlers for the `/geo` resource (province/city autocomplete).

use axum::extract::{Path, State};
use axum::Json;

use crate::state::AppState;

/// GET /api/v1/geo/provinces
pub async fn provinces(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.geo.provinces())
}

/// GET /api/v1/geo/provinces/{province}/cities
///
/// Unknown provinces yield an empty list, not a 404.
pub async fn cities(
    State(state): State<AppState>,
    Path(province): Path<String>,
) -> Json<Vec<String>> {
    Json(state.geo.cities(&province))
}
