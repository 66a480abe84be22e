//! The loop each integration thread runs.
//!
//! A worker repeatedly claims a segment from the shared pool and integrates it
//! depth-first on a private stack. While doing so it keeps the rest of the
//! pool busy: whenever its private stack grows past the donation threshold and
//! the shared stack looks empty, everything but the oldest pending segment is
//! handed over. Once a claimed segment and all its descendants are accepted,
//! the worker releases it, which is where completion is detected.

use tracing::{debug, trace};

use crate::kernel::{Refinement, refine};
use crate::pool::WorkPool;
use crate::segment::Segment;
use crate::stats::WorkerStats;

pub(crate) struct Worker<'a, F: ?Sized> {
    integrand: &'a F,
    epsilon: f64,
    donation_threshold: usize,
    pool: &'a WorkPool,
    /// Pending halves discovered while bisecting, deepest on top.
    local: Vec<Segment>,
    stats: WorkerStats,
}

impl<'a, F> Worker<'a, F>
where
    F: Fn(f64) -> f64 + ?Sized,
{
    pub fn new(
        id: usize,
        integrand: &'a F,
        epsilon: f64,
        donation_threshold: usize,
        pool: &'a WorkPool,
    ) -> Self {
        Self {
            integrand,
            epsilon,
            donation_threshold,
            pool,
            local: Vec::new(),
            stats: WorkerStats::new(id),
        }
    }

    /// Runs until the pool is finished or aborted and returns this worker's share.
    pub fn run(mut self) -> WorkerStats {
        while let Some(segment) = self.pool.acquire() {
            self.stats.acquired += 1;
            let partial = self.integrate_segment(segment);
            if self.pool.is_aborted() {
                break;
            }
            self.stats.partial += partial;
            self.pool.release();
        }
        debug!(
            worker = self.stats.worker,
            acquired = self.stats.acquired,
            accepted = self.stats.accepted,
            splits = self.stats.splits,
            donated = self.stats.donated,
            partial = self.stats.partial,
            "worker finished"
        );
        self.stats
    }

    /// Integrates `segment` completely, donating surplus work along the way.
    fn integrate_segment(&mut self, segment: Segment) -> f64 {
        let mut total = 0.0;
        let mut current = segment;
        loop {
            self.stats.refinements += 1;
            match refine(self.integrand, &current, self.epsilon) {
                Refinement::Split(left, right) => {
                    self.stats.splits += 1;
                    self.local.push(left);
                    current = right;
                }
                Refinement::Accept(value) => {
                    self.stats.accepted += 1;
                    total += value;
                    if self.pool.is_aborted() {
                        self.local.clear();
                        return total;
                    }
                    match self.local.pop() {
                        Some(next) => current = next,
                        None => return total,
                    }
                }
            }

            // a donation always keeps one segment back, so it needs at least two
            if self.local.len() > self.donation_threshold.max(1) && self.pool.is_empty_hint() {
                self.donate();
            }
        }
    }

    /// Moves all but the oldest local segment to the shared stack.
    fn donate(&mut self) {
        // wider (older) segments end up on top of the shared stack
        let donated = self.pool.donate(self.local.drain(1..).rev());
        self.stats.donations += 1;
        self.stats.donated += donated;
        trace!(
            worker = self.stats.worker,
            donated,
            retained = self.local.len(),
            "donated segments to shared stack"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequential::integrate_with_stack;
    use crate::test_utils::{assert_relative_close, square};

    #[test]
    fn single_worker_integrates_whole_pool() {
        let root = Segment::evaluate(&square, 0.0, 3.0).expect("segment should be valid");
        let pool = WorkPool::seeded(root);
        let stats = Worker::new(0, &square, 1e-8, 10, &pool).run();

        assert_relative_close(stats.partial, 9.0, 1e-8, "single worker x^2 on [0, 3]");
        assert_eq!(stats.accepted, stats.splits + 1);
        assert_eq!(stats.acquired, pool.total_pushed());
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn single_worker_matches_sequential_reference() {
        let f = |x: f64| (3.0 * x).cos() * x.exp();
        let root = Segment::evaluate(&f, -1.0, 2.0).expect("segment should be valid");
        let pool = WorkPool::seeded(root);
        let stats = Worker::new(0, &f, 1e-9, 10, &pool).run();

        let reference = integrate_with_stack(f, -1.0, 2.0, 1e-9);
        assert_relative_close(stats.partial, reference, 1e-10, "worker vs stack reference");
    }

    #[test]
    fn zero_threshold_donates_whenever_shared_stack_is_empty() {
        let root = Segment::evaluate(&square, 0.0, 1.0).expect("segment should be valid");
        let pool = WorkPool::seeded(root);
        let stats = Worker::new(0, &square, 1e-6, 0, &pool).run();

        assert!(stats.donations > 0, "expected donations, got {stats:?}");
        assert_eq!(stats.donated + 1, pool.total_pushed());
        assert_eq!(stats.acquired, pool.total_pushed());
        assert_relative_close(stats.partial, 1.0 / 3.0, 1e-5, "x^2 on [0, 1]");
    }

    #[test]
    fn huge_threshold_never_donates() {
        let root = Segment::evaluate(&square, 0.0, 1.0).expect("segment should be valid");
        let pool = WorkPool::seeded(root);
        let stats = Worker::new(0, &square, 1e-8, usize::MAX, &pool).run();

        assert_eq!(stats.donations, 0);
        assert_eq!(stats.acquired, 1);
    }

    #[test]
    fn aborted_pool_stops_worker() {
        let root = Segment::evaluate(&square, 0.0, 1.0).expect("segment should be valid");
        let pool = WorkPool::seeded(root);
        pool.abort();
        let stats = Worker::new(3, &square, 1e-8, 10, &pool).run();

        assert_eq!(stats.worker, 3);
        assert_eq!(stats.acquired, 0);
        assert_eq!(stats.partial, 0.0);
    }
}
