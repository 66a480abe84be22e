#![allow(dead_code)]

use std::f64::consts::PI;

/// `sin(1/x)`, oscillating faster and faster towards zero.
pub fn sin_inv(x: f64) -> f64 {
    (1.0 / x).sin()
}

/// A smooth, cheap integrand for measuring scheduling overhead.
pub fn lorentzian(x: f64) -> f64 {
    1.0 / (1.0 + x * x)
}

/// An integrand that costs noticeably more per evaluation than the bookkeeping around it.
pub fn expensive(x: f64) -> f64 {
    (1..=32).map(|k| (k as f64 * PI * x).sin() / k as f64).sum()
}

/// Set `INTEGRAL_BENCH_VERBOSE=1` to print the integrals being timed.
pub fn verbose() -> bool {
    std::env::var_os("INTEGRAL_BENCH_VERBOSE").is_some()
}
