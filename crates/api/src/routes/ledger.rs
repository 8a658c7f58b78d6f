//! Route definitions for the `/ledger` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ledger;
use crate::state::AppState;

/// Routes mounted at `/ledger`.
///
/// ```text
/// GET    /user/{user_id}    -> list_for_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/user/{user_id}", get(ledger::list_for_user))
}
