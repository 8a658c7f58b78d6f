//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;
use venia_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Used by any handler that supports paginated listing.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to sane bounds: limit in `1..=100` (default 20), offset `>= 0`.
    pub fn clamped(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(20).clamp(1, 100);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Query parameter identifying the acting user on owner-scoped or
/// requester-scoped endpoints (`?requester_id=`).
#[derive(Debug, Deserialize)]
pub struct RequesterParams {
    pub requester_id: Option<DbId>,
}
