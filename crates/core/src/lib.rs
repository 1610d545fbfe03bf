//! Pure domain logic for the ABC POS platform.
//!
//! This crate has no internal dependencies and no I/O so it can be used by
//! the API/repository layer and any future worker or CLI tooling.

pub mod audit;
pub mod error;
pub mod order;
pub mod roles;
pub mod stock;
pub mod types;
