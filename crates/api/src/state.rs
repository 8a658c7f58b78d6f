use std::sync::Arc;

use crate::config::ServerConfig;
use crate::geo::GeoCache;
use crate::images::ImageStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: venia_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Province/city cache seeded at startup.
    pub geo: Arc<GeoCache>,
    /// Backend for uploaded gallery images.
    pub images: Arc<dyn ImageStore>,
}
