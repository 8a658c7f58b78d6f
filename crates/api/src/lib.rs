//! Venia API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! geo cache, image store) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod images;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
