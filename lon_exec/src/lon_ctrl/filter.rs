//! # Rate limiting filters
//!
//! Limit how quickly a command may change between two control cycles. The
//! previous value is held by the caller, the filters themselves are stateless.

use util::maths::clamp;

/// Limit the change from `prev_val` to `input_val` to at most `lim_val` per unit time.
///
/// The output is `prev_val` plus the change clamped to `[-lim_val * dt, lim_val * dt]`. A
/// non-positive `dt` allows no change.
pub fn apply_diff_limit_filter(input_val: f64, prev_val: f64, dt: f64, lim_val: f64) -> f64 {
    apply_diff_limit_filter_asym(input_val, prev_val, dt, lim_val, -lim_val)
}

/// Limit the change from `prev_val` to `input_val` to between `min_val` and `max_val` per unit
/// time.
///
/// The output is `prev_val` plus the change clamped to `[min_val * dt, max_val * dt]`. A
/// non-positive `dt` allows no change. If `min_val > max_val` the lower bound wins.
pub fn apply_diff_limit_filter_asym(
    input_val: f64,
    prev_val: f64,
    dt: f64,
    max_val: f64,
    min_val: f64,
) -> f64 {
    if !(dt > 0.0) {
        return prev_val;
    }

    let diff = input_val - prev_val;
    let (lo, hi) = (min_val * dt, max_val * dt);

    // Exact pass through when the change is already within limits
    if diff >= lo && diff <= hi {
        return input_val;
    }

    prev_val + clamp(&diff, &lo, &hi)
}
