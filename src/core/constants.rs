/// Balances and amounts at or below this magnitude count as settled.
pub const EPSILON: f64 = 0.01;

pub const NO_BALANCES_LABEL: &str = "No balances";
pub const FALLBACK_LABEL: &str = "Simple Greedy (Fallback)";

// App log actions
pub const SETTLEMENT_OPTIMIZED: &str = "SETTLEMENT_OPTIMIZED";
pub const SETTLEMENT_FAILED: &str = "SETTLEMENT_FAILED";

/// Rounds to currency precision (2 decimal places).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
