//! Audit logging constants and utility functions.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and any future worker or CLI tooling.

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known actions for audit log entries. Upper-case to match the values the
/// reporting screens filter on.
pub mod actions {
    pub const CREATE: &str = "CREATE";
    pub const UPDATE: &str = "UPDATE";
    pub const DELETE: &str = "DELETE";
}

// ---------------------------------------------------------------------------
// Audited table names
// ---------------------------------------------------------------------------

/// Table names recorded in audit entries.
pub mod tables {
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const USER_PROFILES: &str = "user_profiles";
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Fields that are redacted from audit snapshots before storage.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "password_hash",
    "token",
    "secret",
    "refresh_token",
    "authorization",
];

/// Redact sensitive fields from a JSON value before it is stored as an
/// audit snapshot.
///
/// Replaces the value of any key containing a [`SENSITIVE_FIELDS`] substring
/// with `"[REDACTED]"`, recursing into nested objects and arrays.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}
