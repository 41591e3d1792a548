use rust_decimal::{Decimal, RoundingStrategy};

use crate::thresholds::{MONEY_PRECISION, SCORE_EPSILON};

/// Extract a short type name from the full module path.
///
/// Given `"my_crate::some_module::MyType"`, returns `"MyType"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// `score > threshold`, ignoring floating-point noise from summed weights
/// (0.2 + 0.1 must not beat 0.3).
pub fn exceeds(score: f64, threshold: f64) -> bool {
    score - threshold > SCORE_EPSILON
}

/// `score < threshold`, with the same tolerance as `exceeds`.
pub fn falls_short(score: f64, threshold: f64) -> bool {
    threshold - score > SCORE_EPSILON
}

/// Round to the money precision, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Round up to the next cent.
pub fn ceil_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_PRECISION, RoundingStrategy::AwayFromZero)
}
