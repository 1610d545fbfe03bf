//! Entity models and DTOs, one module per table group.

pub mod audit;
pub mod order;
pub mod product;
pub mod sale;
pub mod session;
pub mod stock_history;
pub mod user;
