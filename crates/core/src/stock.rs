//! Stock ledger constants and delta arithmetic.
//!
//! Stock is only ever mutated through the ledger (update the product row,
//! then append a `stock_history` entry). These helpers keep the recorded
//! delta consistent with the previous/new values.

// ---------------------------------------------------------------------------
// Change type constants
// ---------------------------------------------------------------------------

/// Known change types for stock history entries.
pub mod change_types {
    pub const INCREASE: &str = "increase";
    pub const DECREASE: &str = "decrease";
    pub const SET: &str = "set";
}

// ---------------------------------------------------------------------------
// Delta arithmetic
// ---------------------------------------------------------------------------

/// Signed change amount for a stock adjustment: `new - previous`.
pub fn stock_delta(previous: i32, new: i32) -> i32 {
    new - previous
}

/// Classify a delta into a change type: positive deltas are increases,
/// negative deltas are decreases, and a zero delta is recorded as `set`.
pub fn classify_change(delta: i32) -> &'static str {
    match delta {
        d if d > 0 => change_types::INCREASE,
        d if d < 0 => change_types::DECREASE,
        _ => change_types::SET,
    }
}
