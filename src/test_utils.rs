//! Shared test utilities for the integrators.
//!
//! Integrands with known antiderivatives plus tolerance helpers, so the tests
//! in each module compare against the same references.

/// `x^2`, integrating to `(b^3 - a^3) / 3`.
pub fn square(x: f64) -> f64 {
    x * x
}

/// `sin(1/x)`, the oscillating integrand the benchmarks are built around.
pub fn sin_inv(x: f64) -> f64 {
    (1.0 / x).sin()
}

/// A smooth bump with no sign change, `1 / (1 + x^2)`.
pub fn lorentzian(x: f64) -> f64 {
    1.0 / (1.0 + x * x)
}

/// Exact integral of [`lorentzian`] from `a` to `b`.
pub fn lorentzian_integral(a: f64, b: f64) -> f64 {
    b.atan() - a.atan()
}

/// Relative error of `actual` against `expected`, falling back to absolute error near zero.
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    if expected == 0.0 {
        return actual.abs();
    }
    (actual - expected).abs() / scale
}

/// Asserts `actual` is within `tolerance` of `expected` in the sense of [`relative_error`].
///
/// # Panics
/// Panics with `context` and both values when the tolerance is exceeded.
pub fn assert_relative_close(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let error = relative_error(actual, expected);
    assert!(
        error <= tolerance,
        "{context}: expected {expected}, got {actual} (relative error {error:e} > {tolerance:e})"
    );
}
