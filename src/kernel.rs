//! The bisection step shared by every integrator in the crate.
//!
//! `refine` compares a segment's coarse trapezoidal estimate with the sum of the
//! estimates over its two halves. If they agree to within the relative
//! tolerance the refined value is accepted, otherwise the halves are returned
//! for further work. It has no state and is called concurrently by all workers.

use crate::segment::{Segment, trapezoid};

/// Outcome of refining one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Refinement {
    /// The segment is done and contributes this value.
    Accept(f64),
    /// The segment must be replaced by its two halves.
    Split(Segment, Segment),
}

/// Refines `segment` once, evaluating `f` at most once (at the midpoint).
///
/// A segment whose midpoint is not strictly inside `(a, b)` can't be bisected
/// any further; its coarse estimate is accepted without touching `f`. This
/// bounds the depth of every refinement tree by the resolution of `f64`, so
/// integration terminates even with `epsilon == 0` or a non-converging
/// integrand.
pub fn refine<F>(f: &F, segment: &Segment, epsilon: f64) -> Refinement
where
    F: Fn(f64) -> f64 + ?Sized,
{
    let (a, b) = (segment.a(), segment.b());
    let c = a.midpoint(b);
    if !is_bisectable(a, c, b) {
        return Refinement::Accept(segment.estimate());
    }

    let (f_a, f_b) = (segment.f_a(), segment.f_b());
    let f_c = f(c);
    let left = Segment::from_parts(a, f_a, c, f_c, trapezoid(f_a, f_c, c - a));
    let right = Segment::from_parts(c, f_c, b, f_b, trapezoid(f_c, f_b, b - c));
    let refined = left.estimate() + right.estimate();

    if (segment.estimate() - refined).abs() > epsilon * refined.abs() {
        Refinement::Split(left, right)
    } else {
        Refinement::Accept(refined)
    }
}

/// True when `c` lies strictly between `a` and `b` (false for NaN).
fn is_bisectable(a: f64, c: f64, b: f64) -> bool {
    a < c && c < b
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn segment_of<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Segment {
        Segment::evaluate(f, a, b).expect("segment should be valid")
    }

    #[test]
    fn linear_integrand_is_accepted_immediately() {
        let f = |x: f64| 2.0 * x + 1.0;
        let segment = segment_of(&f, 0.0, 2.0);
        assert_eq!(refine(&f, &segment, 1e-12), Refinement::Accept(6.0));
    }

    #[test]
    fn curved_integrand_splits_at_midpoint() {
        let f = |x: f64| x * x;
        let segment = segment_of(&f, 0.0, 2.0);
        match refine(&f, &segment, 1e-6) {
            Refinement::Split(left, right) => {
                assert_eq!((left.a(), left.b()), (0.0, 1.0));
                assert_eq!((right.a(), right.b()), (1.0, 2.0));
                assert_eq!(left.f_b(), 1.0);
                assert_eq!(right.f_a(), 1.0);
                assert_eq!(left.estimate(), 0.5);
                assert_eq!(right.estimate(), 2.5);
            }
            Refinement::Accept(value) => panic!("expected split, got accept({value})"),
        }
    }

    #[test]
    fn loose_tolerance_accepts_refined_value() {
        let f = |x: f64| x * x;
        let segment = segment_of(&f, 0.0, 2.0);
        // coarse 4.0, refined 3.0
        assert_eq!(refine(&f, &segment, 0.5), Refinement::Accept(3.0));
    }

    #[test]
    fn zero_tolerance_still_accepts_exact_estimates() {
        let f = |_: f64| 3.0;
        let segment = segment_of(&f, -1.0, 1.0);
        assert_eq!(refine(&f, &segment, 0.0), Refinement::Accept(6.0));
    }

    #[test]
    fn evaluates_integrand_once_per_refinement() {
        let calls = AtomicUsize::new(0);
        let f = |x: f64| {
            calls.fetch_add(1, Ordering::Relaxed);
            x.sin()
        };
        let segment = segment_of(&f, 0.0, 1.0);
        calls.store(0, Ordering::Relaxed);
        let _ = refine(&f, &segment, 1e-10);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn collapsed_segment_accepts_without_evaluating() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        let segment = Segment::new(a, 5.0, b, 7.0).expect("segment should be valid");
        let refinement = refine(
            &|_: f64| -> f64 { panic!("integrand must not run") },
            &segment,
            0.0,
        );
        assert_eq!(refinement, Refinement::Accept(segment.estimate()));
    }

    #[test]
    fn infinite_limits_do_not_bisect() {
        let segment = Segment::new(f64::NEG_INFINITY, 0.0, f64::INFINITY, 0.0)
            .expect("segment should be valid");
        let refinement = refine(
            &|_: f64| -> f64 { panic!("integrand must not run") },
            &segment,
            1e-8,
        );
        assert!(matches!(refinement, Refinement::Accept(_)));
    }

    #[test]
    fn nan_integrand_is_accepted() {
        let f = |_: f64| f64::NAN;
        let segment = segment_of(&f, 0.0, 1.0);
        match refine(&f, &segment, 1e-8) {
            Refinement::Accept(value) => assert!(value.is_nan()),
            Refinement::Split(..) => panic!("NaN comparison should accept"),
        }
    }
}
