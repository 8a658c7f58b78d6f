//! Domain logic for the venue booking platform.
//!
//! This crate has zero internal dependencies so the availability engine and
//! catalog rules can be exercised by the API/repository layer and by any
//! future worker or CLI tooling.

pub mod booking;
pub mod catalog;
pub mod error;
pub mod occupancy;
pub mod types;
