//! Well-known role name constants.
//!
//! These must match the seed data in `20260801000001_create_user_tables.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
