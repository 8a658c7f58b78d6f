//! User entity model and DTOs.
//!
//! Authentication lives outside this service; callers present explicit user
//! ids. Only the fields needed to own spaces and make reservations are kept.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use venia_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for registering a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

/// DTO for updating a profile. Only non-`None` fields are applied; the
/// avatar has its own upload endpoint and is not patched here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
