//! Entry points that run an integration on a pool of worker threads.
//!
//! Every call seeds a fresh work pool with the root segment, starts the
//! requested number of scoped threads, and sums what they return. Nothing is
//! shared between calls.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use tracing::debug;

use crate::error::IntegralError;
use crate::pool::WorkPool;
use crate::segment::{Orientation, orient};
use crate::stats::{IntegrationReport, WorkerStats};
use crate::worker::Worker;

/// Local stack size above which a worker donates work to idle peers.
pub const DEFAULT_DONATION_THRESHOLD: usize = 10;

/// Integrates `f` from `a` to `b` to relative tolerance `epsilon` on `n_threads` threads.
///
/// `a > b` yields the negated integral over `[b, a]`. `a == b` and
/// `n_threads == 0` both yield `0.0` without evaluating `f`. Inputs are not
/// validated: a NaN limit gives NaN, infinite limits give a non-finite value,
/// and a negative or NaN `epsilon` behaves like `0.0` or "accept everything"
/// respectively. Use [`Integrator`] to have those rejected instead.
///
/// # Panics
/// Re-raises a panic from `f` once every worker has stopped.
///
/// # Examples
/// ```
/// let value = integral::integrate(|x| x * x, 0.0, 3.0, 1e-8, 4);
/// assert!((value - 9.0).abs() < 1e-6);
/// ```
pub fn integrate<F>(f: F, a: f64, b: f64, epsilon: f64, n_threads: usize) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    run(&f, a, b, epsilon, n_threads, DEFAULT_DONATION_THRESHOLD).value
}

/// A validated integration setup for one integrand.
///
/// ```
/// use integral::Integrator;
///
/// let integrator = Integrator::new(f64::sin, 1e-9)?.with_threads(2);
/// let value = integrator.integrate(0.0, std::f64::consts::PI)?;
/// assert!((value - 2.0).abs() < 1e-7);
/// # Ok::<(), integral::IntegralError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Integrator<F> {
    integrand: F,
    epsilon: f64,
    threads: usize,
    donation_threshold: usize,
}

impl<F> Integrator<F>
where
    F: Fn(f64) -> f64 + Sync,
{
    /// Creates an integrator with relative tolerance `epsilon`.
    ///
    /// `epsilon` must be finite and non-negative. Zero is allowed and refines
    /// every segment down to the resolution of `f64`. The thread count defaults
    /// to the available parallelism.
    pub fn new(integrand: F, epsilon: f64) -> Result<Self, IntegralError> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(IntegralError::InvalidTolerance { epsilon });
        }
        Ok(Self {
            integrand,
            epsilon,
            threads: default_threads(),
            donation_threshold: DEFAULT_DONATION_THRESHOLD,
        })
    }

    /// Sets the number of worker threads. Zero makes every integral `0.0`.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the local stack size above which workers donate work.
    pub fn with_donation_threshold(mut self, threshold: usize) -> Self {
        self.donation_threshold = threshold;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn donation_threshold(&self) -> usize {
        self.donation_threshold
    }

    /// Integrates from `a` to `b`; both limits must be finite.
    pub fn integrate(&self, a: f64, b: f64) -> Result<f64, IntegralError> {
        Ok(self.integrate_with_report(a, b)?.value)
    }

    /// Like [`Integrator::integrate`], also returning how the work was spread.
    pub fn integrate_with_report(
        &self,
        a: f64,
        b: f64,
    ) -> Result<IntegrationReport, IntegralError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(IntegralError::NonFiniteBound { a, b });
        }
        Ok(run(
            &self.integrand,
            a,
            b,
            self.epsilon,
            self.threads,
            self.donation_threshold,
        ))
    }
}

fn default_threads() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

fn run<F>(
    f: &F,
    a: f64,
    b: f64,
    epsilon: f64,
    threads: usize,
    donation_threshold: usize,
) -> IntegrationReport
where
    F: Fn(f64) -> f64 + Sync + ?Sized,
{
    if threads == 0 {
        return IntegrationReport::trivial(0.0);
    }
    let (root, sign) = match orient(f, a, b) {
        Orientation::Degenerate => return IntegrationReport::trivial(0.0),
        Orientation::Unordered => return IntegrationReport::trivial(f64::NAN),
        Orientation::Ready { root, sign } => (root, sign),
    };

    debug!(a, b, epsilon, threads, "starting integration");
    let pool = WorkPool::seeded(root);
    let workers = run_workers(f, &pool, epsilon, threads, donation_threshold);
    let value = sign * workers.iter().map(|w| w.partial).sum::<f64>();

    let report = IntegrationReport {
        value,
        workers,
        shared_pushes: pool.total_pushed(),
    };
    debug!(
        value,
        accepted = report.accepted(),
        splits = report.splits(),
        shared_pushes = report.shared_pushes,
        "integration finished"
    );
    report
}

/// Runs `threads` workers over `pool` and returns their statistics in worker order.
///
/// A panicking worker aborts the pool so the others stop at their next
/// segment; the first panic is re-raised after all of them are joined.
fn run_workers<F>(
    f: &F,
    pool: &WorkPool,
    epsilon: f64,
    threads: usize,
    donation_threshold: usize,
) -> Vec<WorkerStats>
where
    F: Fn(f64) -> f64 + Sync + ?Sized,
{
    let outcomes: Vec<thread::Result<WorkerStats>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|id| {
                scope.spawn(move || spawn_worker(id, f, pool, epsilon, donation_threshold))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().and_then(|outcome| outcome))
            .collect()
    });

    let mut workers = Vec::with_capacity(threads);
    let mut first_panic = None;
    for outcome in outcomes {
        match outcome {
            Ok(stats) => workers.push(stats),
            Err(payload) => {
                if first_panic.is_none() {
                    first_panic = Some(payload);
                }
            }
        }
    }
    if let Some(payload) = first_panic {
        panic::resume_unwind(payload);
    }
    workers
}

fn spawn_worker<F>(
    id: usize,
    f: &F,
    pool: &WorkPool,
    epsilon: f64,
    donation_threshold: usize,
) -> thread::Result<WorkerStats>
where
    F: Fn(f64) -> f64 + ?Sized,
{
    let worker = Worker::new(id, f, epsilon, donation_threshold, pool);
    panic::catch_unwind(AssertUnwindSafe(|| worker.run())).inspect_err(|_| pool.abort())
}
