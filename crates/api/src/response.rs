//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard paginated list envelope.
///
/// Used by listing endpoints so clients can render page controls without a
/// second count request.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
