//! HTTP request handlers, one module per resource.

pub mod geo;
pub mod ledger;
pub mod reservations;
pub mod spaces;
pub mod users;
