use std::sync::atomic::{AtomicBool, Ordering};

/// One-way flag raised when an integration has to be abandoned.
///
/// Workers poll it between refinements, so a panicking integrand on one thread
/// stops the others at their next segment instead of after the whole interval.
#[derive(Debug, Default)]
pub struct AbortFlag {
    raised: AtomicBool,
}

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
