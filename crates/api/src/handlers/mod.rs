pub mod audit_logs;
pub mod auth;
pub mod orders;
pub mod products;
pub mod reports;
pub mod uploads;
pub mod users;
