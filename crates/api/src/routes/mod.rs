pub mod geo;
pub mod health;
pub mod ledger;
pub mod reservations;
pub mod spaces;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                    create
/// /users/{id}                               get, update
/// /users/{id}/avatar                        avatar upload (multipart)
///
/// /spaces                                   search, create (multipart)
/// /spaces/{id}                              get, update (multipart), delete
/// /spaces/{id}/publish                      publish (POST)
/// /spaces/{id}/pause                        pause (POST)
///
/// /reservations                             create
/// /reservations/{id}/cancel                 cancel (PATCH)
/// /reservations/user/{user_id}              booker's history
/// /reservations/space/{space_id}            owner's calendar
/// /reservations/occupied/{space_id}         occupied dates
///
/// /ledger/user/{user_id}                    payment history
///
/// /geo/provinces                            list provinces
/// /geo/provinces/{province}/cities          list cities
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/spaces", spaces::router())
        .nest("/reservations", reservations::router())
        .nest("/ledger", ledger::router())
        .nest("/geo", geo::router())
}
