//! Per-worker counters and the report assembled from them.

/// What one worker did during an integration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkerStats {
    /// Worker index within the pool.
    pub worker: usize,
    /// Sum of every value this worker accepted, over the oriented interval.
    pub partial: f64,
    /// Segments claimed from the shared stack.
    pub acquired: usize,
    /// Kernel invocations.
    pub refinements: usize,
    /// Segments accepted (including collapsed ones).
    pub accepted: usize,
    /// Segments replaced by their two halves.
    pub splits: usize,
    /// Times this worker moved local work to the shared stack.
    pub donations: usize,
    /// Segments moved to the shared stack.
    pub donated: usize,
}

impl WorkerStats {
    pub fn new(worker: usize) -> Self {
        Self {
            worker,
            ..Self::default()
        }
    }
}

/// Result of an integration together with how the work was distributed.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegrationReport {
    /// The integral from `a` to `b` (negated when `a > b`).
    pub value: f64,
    /// One entry per worker, in worker order. Empty when no thread was started.
    pub workers: Vec<WorkerStats>,
    /// Segments that went through the shared stack, the root included.
    pub shared_pushes: usize,
}

impl IntegrationReport {
    /// Report for an integration that needed no work at all.
    pub(crate) fn trivial(value: f64) -> Self {
        Self {
            value,
            workers: Vec::new(),
            shared_pushes: 0,
        }
    }

    pub fn accepted(&self) -> usize {
        self.workers.iter().map(|w| w.accepted).sum()
    }

    pub fn splits(&self) -> usize {
        self.workers.iter().map(|w| w.splits).sum()
    }

    pub fn acquired(&self) -> usize {
        self.workers.iter().map(|w| w.acquired).sum()
    }

    pub fn refinements(&self) -> usize {
        self.workers.iter().map(|w| w.refinements).sum()
    }

    pub fn donated(&self) -> usize {
        self.workers.iter().map(|w| w.donated).sum()
    }

    /// Number of integrand evaluations, including the two at the limits.
    ///
    /// Collapsed segments are accepted without an evaluation, so this is an
    /// upper bound when any segment hit the resolution of `f64`.
    pub fn evaluations_upper_bound(&self) -> usize {
        if self.workers.is_empty() {
            return 0;
        }
        self.refinements() + 2
    }
}
