//! Order arithmetic, status constants, and order-number generation.
//!
//! All money arithmetic is plain `f64` — line subtotals and order totals are
//! computed in the same floating precision so the invariant
//! `total == sum(subtotals)` holds exactly.

use chrono::Utc;
use rand::Rng;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Known order lifecycle statuses. Transitions are NOT validated as a state
/// machine: any status may overwrite any other.
pub mod order_status {
    pub const PENDING: &str = "pending";
    pub const CONFIRMED: &str = "confirmed";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";
}

/// Known payment methods.
pub mod payment_methods {
    pub const CASH: &str = "cash";
    pub const CARD: &str = "card";
    pub const GCASH: &str = "gcash";
}

/// Known payment statuses.
pub mod payment_status {
    pub const PENDING: &str = "pending";
    pub const AWAITING: &str = "awaiting_payment";
    pub const PAID: &str = "paid";
    pub const FAILED: &str = "failed";
    pub const REFUNDED: &str = "refunded";
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Compute a line-item subtotal.
pub fn line_subtotal(quantity: i32, unit_price: f64) -> f64 {
    f64::from(quantity) * unit_price
}

/// Compute an order total as the sum of `(quantity, unit_price)` line
/// subtotals, in the same precision as [`line_subtotal`].
pub fn order_total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (i32, f64)>,
{
    lines
        .into_iter()
        .map(|(quantity, unit_price)| line_subtotal(quantity, unit_price))
        .sum()
}

// ---------------------------------------------------------------------------
// Payment defaults
// ---------------------------------------------------------------------------

/// Default payment status for a payment method when the caller did not
/// supply one: cash sales are settled at the counter, everything else
/// starts out pending.
pub fn default_payment_status(payment_method: &str) -> &'static str {
    if payment_method == payment_methods::CASH {
        payment_status::PAID
    } else {
        payment_status::PENDING
    }
}

// ---------------------------------------------------------------------------
// Order numbers
// ---------------------------------------------------------------------------

/// Build an order number from a creation instant and a numeric suffix.
///
/// Convention: `ORD-{unix_millis}-{suffix:04}`. The suffix makes collisions
/// between orders created in the same millisecond unlikely; uniqueness is
/// "good enough in practice" and is not detected or enforced server-side.
///
/// # Examples
///
/// ```
/// use abcpos_core::order::order_number_at;
///
/// assert_eq!(order_number_at(1_700_000_000_000, 42), "ORD-1700000000000-0042");
/// ```
pub fn order_number_at(at_millis: i64, suffix: u32) -> String {
    format!("ORD-{at_millis}-{suffix:04}")
}

/// Generate an order number for the given creation instant with a random
/// four-digit suffix.
pub fn generate_order_number(now: Timestamp) -> String {
    let suffix = rand::rng().random_range(0..10_000u32);
    order_number_at(now.timestamp_millis(), suffix)
}

/// Generate an order number for "now".
pub fn generate_order_number_now() -> String {
    generate_order_number(Utc::now())
}
