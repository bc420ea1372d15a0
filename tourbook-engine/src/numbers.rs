//! Numeric conversion helpers centralizing the money casts.
//!
//! Whole-unit totals (destination cost, package base cost) are integers that
//! absorb decimal activity costs by truncation toward zero, so every such
//! accumulation goes through here.

use num_traits::cast::cast;

/// Truncate a f64 toward zero and clamp it to the i64 range, returning 0 for NaN.
#[must_use]
pub fn truncate_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).trunc();
    cast::<f64, i64>(clamped).unwrap_or(if clamped > 0.0 { i64::MAX } else { i64::MIN })
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Add a decimal amount to a whole-unit total, truncating the sum.
#[must_use]
pub fn accumulate_truncated(total: i64, amount: f64) -> i64 {
    truncate_f64_to_i64(i64_to_f64(total) + amount)
}

/// Scale a whole-unit total by a rate, truncating the product.
#[must_use]
pub fn scale_truncated(total: i64, rate: f64) -> i64 {
    truncate_f64_to_i64(i64_to_f64(total) * rate)
}

/// Render a decimal amount with at least one fractional digit (`50.0`, `45.5`).
#[must_use]
pub fn format_decimal(value: f64) -> String {
    // Debug keeps the trailing `.0` on whole numbers.
    format!("{value:?}")
}
