//! Segmented easing over a single progress scalar.
//!
//! One global progress value in `[0, 1]` drives several independently-timed
//! sub-animations without separate timers: segment `i` of `n` owns the
//! progress interval `[i/n, (i+1)/n]`, mapped linearly onto `[0, 1]` by
//! [`divide_scale`], and [`sinify`] turns linear progress into a symmetric
//! pulse that peaks at the cycle midpoint.

use std::f64::consts::PI;

/// Clamp a progress value shifted into segment `i`'s window to non-negative.
///
/// Segment `i` only starts contributing once the global `scale` exceeds
/// `i / n`.
pub fn max_scale(scale: f64, i: u32, n: u32) -> f64 {
    debug_assert!(n > 0, "segment count must be positive");
    (scale - f64::from(i) / f64::from(n)).max(0.0)
}

/// Map segment `i`'s share of the global progress onto `[0, 1]`.
pub fn divide_scale(scale: f64, i: u32, n: u32) -> f64 {
    debug_assert!(n > 0, "segment count must be positive");
    max_scale(scale, i, n).min(1.0 / f64::from(n)) * f64::from(n)
}

/// Symmetric ease-in/ease-out pulse: 0 at both ends, 1 at `scale = 0.5`.
pub fn sinify(scale: f64) -> f64 {
    (scale * PI).sin()
}
