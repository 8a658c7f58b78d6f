//! Handlers for the `/ledger` resource (simulated payment history).

use axum::extract::{Path, State};
use axum::Json;
use venia_core::error::CoreError;
use venia_core::types::DbId;
use venia_db::models::ledger::LedgerEntry;
use venia_db::repositories::{LedgerRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/ledger/user/{user_id}
///
/// A registered user's payment history, most recent first. Guests produce
/// no entries, so there is nothing to look up for them.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<LedgerEntry>>> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let entries = LedgerRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(entries))
}
