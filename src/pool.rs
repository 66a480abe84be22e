//! Shared work stack and the termination protocol built around it.
//!
//! All workers of one integration share a single `WorkPool`. It bundles:
//! - the `WorkStack` of segments nobody is working on yet,
//! - the number of workers currently processing a segment,
//! - a `finished` flag set exactly once, when no work is left anywhere.
//!
//! These live behind one mutex so that "pop and become active" and "become
//! idle and check for completion" are each a single atomic step. Without that
//! pairing a worker could observe an empty stack and zero active workers while
//! another worker is between popping a segment and registering as active.
//!
//! The condition variable plays the role of the availability signal: idle
//! workers sleep on it while the stack is empty. A worker popping a segment
//! passes the signal on if more segments remain, a donation onto an empty stack
//! raises it, and completion (or an abort) wakes everyone.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Condvar, Mutex};

use crate::concurrency::AbortFlag;
use crate::segment::Segment;

/// LIFO of segments waiting for a worker.
///
/// Only ever accessed through the pool's lock.
#[derive(Debug, Default)]
pub(crate) struct WorkStack {
    segments: Vec<Segment>,
    /// Every segment ever pushed, including the root.
    pushed: usize,
}

impl WorkStack {
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
        self.pushed += 1;
    }

    pub fn try_pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn total_pushed(&self) -> usize {
        self.pushed
    }
}

#[derive(Debug)]
struct PoolState {
    stack: WorkStack,
    active: usize,
    finished: bool,
}

/// Work shared between the workers of one integration.
pub(crate) struct WorkPool {
    state: Mutex<PoolState>,
    available: Condvar,
    /// Stack length as of the last locked update, readable without the lock.
    pending: AtomicUsize,
    abort: AbortFlag,
}

impl WorkPool {
    /// Creates a pool whose stack holds only `root`.
    pub fn seeded(root: Segment) -> Self {
        let mut stack = WorkStack::default();
        stack.push(root);
        Self {
            state: Mutex::new(PoolState {
                stack,
                active: 0,
                finished: false,
            }),
            available: Condvar::new(),
            pending: AtomicUsize::new(1),
            abort: AbortFlag::new(),
        }
    }

    /// Blocks until a segment can be claimed and registers the caller as active.
    ///
    /// Returns `None` once the integration is finished or aborted. Every
    /// `Some` must be paired with a later call to [`WorkPool::release`].
    pub fn acquire(&self) -> Option<Segment> {
        let mut state = self.state.lock();
        loop {
            if state.finished || self.abort.is_raised() {
                return None;
            }
            if let Some(segment) = state.stack.try_pop() {
                self.publish_len(&state.stack);
                if !state.stack.is_empty() {
                    self.available.notify_one();
                }
                state.active += 1;
                return Some(segment);
            }
            self.available.wait(&mut state);
        }
    }

    /// Pushes `segments` onto the shared stack and returns how many were pushed.
    ///
    /// The caller stays active; donating never changes the active count.
    pub fn donate<I>(&self, segments: I) -> usize
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut state = self.state.lock();
        let was_empty = state.stack.is_empty();
        let pushed_before = state.stack.total_pushed();
        for segment in segments {
            state.stack.push(segment);
        }
        let donated = state.stack.total_pushed() - pushed_before;
        self.publish_len(&state.stack);
        if was_empty && donated > 0 {
            self.available.notify_one();
        }
        donated
    }

    /// Marks the caller's current segment as fully accounted for.
    ///
    /// If this leaves no active worker and an empty stack, no more work can
    /// ever appear: the pool is marked finished and every waiter is woken.
    /// Returns whether this call finished the pool.
    pub fn release(&self) -> bool {
        let mut state = self.state.lock();
        debug_assert!(state.active > 0, "release without a matching acquire");
        state.active = state.active.saturating_sub(1);
        if state.active == 0 && state.stack.is_empty() {
            state.finished = true;
            self.available.notify_all();
            return true;
        }
        false
    }

    /// Lock-free emptiness check; may be stale by the time the caller acts on it.
    pub fn is_empty_hint(&self) -> bool {
        self.pending.load(Ordering::Relaxed) == 0
    }

    /// Abandons the integration and wakes every waiting worker.
    pub fn abort(&self) {
        self.abort.raise();
        let _state = self.state.lock();
        self.available.notify_all();
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_raised()
    }

    /// Total number of segments that went through the shared stack.
    pub fn total_pushed(&self) -> usize {
        self.state.lock().stack.total_pushed()
    }

    fn publish_len(&self, stack: &WorkStack) {
        self.pending.store(stack.len(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn unit(a: f64) -> Segment {
        Segment::new(a, 0.0, a + 1.0, 0.0).expect("segment should be valid")
    }

    #[test]
    fn work_stack_is_lifo_and_counts_pushes() {
        let mut stack = WorkStack::default();
        stack.push(unit(0.0));
        stack.push(unit(1.0));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.try_pop().map(|s| s.a()), Some(1.0));
        assert_eq!(stack.try_pop().map(|s| s.a()), Some(0.0));
        assert!(stack.try_pop().is_none());
        assert!(stack.is_empty());
        assert_eq!(stack.total_pushed(), 2);
    }

    #[test]
    fn releasing_last_segment_finishes_pool() {
        let pool = WorkPool::seeded(unit(0.0));
        assert!(!pool.is_empty_hint());

        let root = pool.acquire().expect("root should be available");
        assert_eq!(root.a(), 0.0);
        assert!(pool.is_empty_hint());

        assert!(pool.release());
        assert!(pool.acquire().is_none());
        assert_eq!(pool.total_pushed(), 1);
    }

    #[test]
    fn release_with_pending_work_does_not_finish() {
        let pool = WorkPool::seeded(unit(0.0));
        let _root = pool.acquire().expect("root should be available");
        assert_eq!(pool.donate([unit(1.0), unit(2.0)]), 2);
        assert!(!pool.is_empty_hint());
        assert!(!pool.release());

        let first = pool.acquire().expect("donated segment should be available");
        let second = pool.acquire().expect("donated segment should be available");
        assert_eq!((first.a(), second.a()), (2.0, 1.0));
        assert!(!pool.release());
        assert!(pool.release());
        assert_eq!(pool.total_pushed(), 3);
    }

    #[test]
    fn active_worker_blocks_completion() {
        let pool = WorkPool::seeded(unit(0.0));
        let _root = pool.acquire().expect("root should be available");
        pool.donate([unit(1.0)]);
        let _donated = pool.acquire().expect("donated segment should be available");
        // stack is empty but one worker is still active
        assert!(!pool.release());
        assert!(pool.release());
    }

    #[test]
    fn donation_wakes_blocked_worker() {
        let pool = WorkPool::seeded(unit(0.0));
        let _root = pool.acquire().expect("root should be available");

        thread::scope(|scope| {
            let helper = scope.spawn(|| {
                let segment = pool.acquire().expect("helper should receive donated work");
                assert_eq!(segment.a(), 5.0);
                pool.release()
            });
            pool.donate([unit(5.0)]);
            let finished_by_main = pool.release();
            let finished_by_helper = helper.join().expect("helper should join");
            // exactly one release observes completion
            assert!(finished_by_main ^ finished_by_helper);
        });
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn completion_wakes_every_waiter() {
        let pool = WorkPool::seeded(unit(0.0));
        let _root = pool.acquire().expect("root should be available");

        thread::scope(|scope| {
            let waiters: Vec<_> = (0..4).map(|_| scope.spawn(|| pool.acquire())).collect();
            assert!(pool.release());
            for waiter in waiters {
                assert!(waiter.join().expect("waiter should join").is_none());
            }
        });
    }

    #[test]
    fn abort_wakes_every_waiter() {
        let pool = WorkPool::seeded(unit(0.0));
        let _root = pool.acquire().expect("root should be available");

        thread::scope(|scope| {
            let waiters: Vec<_> = (0..4).map(|_| scope.spawn(|| pool.acquire())).collect();
            pool.abort();
            for waiter in waiters {
                assert!(waiter.join().expect("waiter should join").is_none());
            }
        });
        assert!(pool.is_aborted());
    }

    #[test]
    fn aborted_pool_hands_out_nothing() {
        let pool = WorkPool::seeded(unit(0.0));
        pool.abort();
        assert!(pool.acquire().is_none());
    }
}
