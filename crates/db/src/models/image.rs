//! Space gallery image model.

use serde::Serialize;
use sqlx::FromRow;
use venia_core::types::DbId;

/// A row from the `space_images` table. `position` is a dense 0-based index;
/// the gallery is rebuilt from scratch whenever an explicit order is supplied.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpaceImage {
    pub id: DbId,
    pub space_id: DbId,
    pub url: String,
    pub position: i32,
}
