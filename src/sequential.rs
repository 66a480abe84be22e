//! Single-threaded reference integrators.
//!
//! Both walk exactly the refinement tree the pooled integrator walks, because
//! they use the same kernel. Their results therefore differ from
//! [`crate::integrate`] only by the order in which accepted values are summed,
//! which makes them the natural cross-check for the concurrent code.

use crate::kernel::{Refinement, refine};
use crate::segment::{Orientation, Segment, orient};

/// Integrates `f` from `a` to `b` using an explicit stack.
pub fn integrate_with_stack<F>(f: F, a: f64, b: f64, epsilon: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    match orient(&f, a, b) {
        Orientation::Degenerate => 0.0,
        Orientation::Unordered => f64::NAN,
        Orientation::Ready { root, sign } => sign * stack_walk(&f, root, epsilon),
    }
}

/// Integrates `f` from `a` to `b` by plain recursion.
///
/// Recursion depth is bounded by the number of times `[a, b]` can be halved
/// in `f64`, roughly two thousand levels at worst.
pub fn integrate_recursive<F>(f: F, a: f64, b: f64, epsilon: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    match orient(&f, a, b) {
        Orientation::Degenerate => 0.0,
        Orientation::Unordered => f64::NAN,
        Orientation::Ready { root, sign } => sign * recurse(&f, &root, epsilon),
    }
}

fn stack_walk<F>(f: &F, root: Segment, epsilon: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut total = 0.0;
    let mut pending = vec![root];
    while let Some(segment) = pending.pop() {
        match refine(f, &segment, epsilon) {
            Refinement::Accept(value) => total += value,
            Refinement::Split(left, right) => {
                pending.push(left);
                pending.push(right);
            }
        }
    }
    total
}

fn recurse<F>(f: &F, segment: &Segment, epsilon: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    match refine(f, segment, epsilon) {
        Refinement::Accept(value) => value,
        Refinement::Split(left, right) => recurse(f, &left, epsilon) + recurse(f, &right, epsilon),
    }
}
