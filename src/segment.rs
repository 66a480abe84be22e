//! Pending sub-intervals of an integration.
//!
//! A `Segment` caches the integrand at both endpoints together with the
//! trapezoidal estimate over the whole interval, so refining it only costs one
//! new evaluation at the midpoint.

use std::cmp::Ordering;

use crate::error::IntegralError;

/// Trapezoidal estimate over an interval of `width` with endpoint values `f_a` and `f_b`.
pub fn trapezoid(f_a: f64, f_b: f64, width: f64) -> f64 {
    f_a.midpoint(f_b) * width
}

/// One pending interval `[a, b]` with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    a: f64,
    f_a: f64,
    b: f64,
    f_b: f64,
    estimate: f64,
}

impl Segment {
    /// Creates a segment from known endpoint values.
    ///
    /// Returns `EmptyInterval` unless `a < b` (which also rejects NaN limits).
    pub fn new(a: f64, f_a: f64, b: f64, f_b: f64) -> Result<Self, IntegralError> {
        if a.partial_cmp(&b) != Some(Ordering::Less) {
            return Err(IntegralError::EmptyInterval { a, b });
        }
        Ok(Self::from_parts(a, f_a, b, f_b, trapezoid(f_a, f_b, b - a)))
    }

    /// Evaluates `f` at both limits and builds the segment covering `[a, b]`.
    pub fn evaluate<F>(f: &F, a: f64, b: f64) -> Result<Self, IntegralError>
    where
        F: Fn(f64) -> f64 + ?Sized,
    {
        if a.partial_cmp(&b) != Some(Ordering::Less) {
            return Err(IntegralError::EmptyInterval { a, b });
        }
        Self::new(a, f(a), b, f(b))
    }

    /// Builds a segment whose estimate was already computed by the caller.
    pub(crate) fn from_parts(a: f64, f_a: f64, b: f64, f_b: f64, estimate: f64) -> Self {
        debug_assert!(a < b, "segment [{a}, {b}] must be non-empty");
        Self {
            a,
            f_a,
            b,
            f_b,
            estimate,
        }
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn f_a(&self) -> f64 {
        self.f_a
    }

    pub fn f_b(&self) -> f64 {
        self.f_b
    }

    /// Coarse trapezoidal estimate over the whole segment.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn width(&self) -> f64 {
        self.b - self.a
    }
}

/// How an integral from `a` to `b` maps onto a root segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Orientation {
    /// `a == b`; the integral is zero and `f` is never called.
    Degenerate,
    /// A limit is NaN; the integral is NaN.
    Unordered,
    /// Integrate `root` and multiply by `sign` (`-1.0` when `a > b`).
    Ready { root: Segment, sign: f64 },
}

/// Builds the root segment over the ordered limits of `[a, b]`.
pub(crate) fn orient<F>(f: &F, a: f64, b: f64) -> Orientation
where
    F: Fn(f64) -> f64 + ?Sized,
{
    let (lower, upper, sign) = match a.partial_cmp(&b) {
        None => return Orientation::Unordered,
        Some(Ordering::Equal) => return Orientation::Degenerate,
        Some(Ordering::Less) => (a, b, 1.0),
        Some(Ordering::Greater) => (b, a, -1.0),
    };
    match Segment::evaluate(f, lower, upper) {
        Ok(root) => Orientation::Ready { root, sign },
        Err(_) => Orientation::Unordered,
    }
}
