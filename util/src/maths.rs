//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Linearly interpolate between `a` and `b`.
///
/// `ratio` is not clamped, values outside `[0, 1]` extrapolate. A ratio of
/// exactly 0 returns `a` and exactly 1 returns `b`, without rounding error.
pub fn lerp<T>(a: T, b: T, ratio: T) -> T
where
    T: Float
{
    a * (T::one() - ratio) + b * ratio
}

/// Clamp a value between `min` and `max`.
///
/// Unlike `f64::clamp` this never panics. If `min > max` the result is `min`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Get the signed angular distance from `a` to `b`.
///
/// This function will return the shortest signed distance between a and b accounting for wrapping
/// at 2pi, so the result is always in `[-pi, pi]`. Inputs need not be wrapped.
pub fn get_ang_dist_2pi<T>(a: T, b: T) -> T
where
    T: Float
{
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap_or_else(T::zero);
    
    let c = rem_euclid(a - b, tau_t);
    let d = rem_euclid(b - a, tau_t);

    if c < d {
        -c
    }
    else {
        d
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}
