use integral::{Refinement, Segment, refine};

/// Integrates `f` by handing both halves of every split to `rayon::join`.
///
/// Walks the same refinement tree as the pooled integrator, but lets rayon's
/// work stealing decide where each half runs.
pub fn integrate_fork_join<F>(f: &F, a: f64, b: f64, epsilon: f64) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    if b < a {
        return -integrate_fork_join(f, b, a, epsilon);
    }
    match Segment::evaluate(f, a, b) {
        Ok(root) => split(f, &root, epsilon),
        Err(_) => 0.0,
    }
}

fn split<F>(f: &F, segment: &Segment, epsilon: f64) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    match refine(f, segment, epsilon) {
        Refinement::Accept(value) => value,
        Refinement::Split(left, right) => {
            let (lower, upper) = rayon::join(
                || split(f, &left, epsilon),
                || split(f, &right, epsilon),
            );
            lower + upper
        }
    }
}
