//! A counting semaphore built on thread parking.
//!
//! The fast path is a single compare-and-swap on the permit counter; the
//! contended path spins briefly and then parks on a FIFO wait queue.
//! Releases hand a permit over and wake the oldest waiter while holding the
//! queue lock, so a release can never slip between a waiter's last check
//! and its park.

use super::wait_queue::WaitQueue;
use crossbeam_utils::Backoff;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tracing::trace;

/// A counting semaphore.
///
/// `acquire` blocks until a permit is available, `release` returns one.
/// A semaphore created with one permit is the binary gate the lightswitch
/// protocol is built from: held exactly while the guarded activity is in
/// progress.
///
/// There is no error path. Waiting is indefinite, and balancing acquires
/// against releases is the caller's contract; an unbalanced release is a
/// programming defect, not a runtime-reported condition.
pub struct Semaphore {
    permits: AtomicUsize,
    queue: WaitQueue,
}

impl Semaphore {
    /// Creates a semaphore holding `permits` permits.
    pub const fn new(permits: usize) -> Self {
        Self {
            permits: AtomicUsize::new(permits),
            queue: WaitQueue::new(),
        }
    }

    /// Attempts to take a permit without blocking.
    pub fn try_acquire(&self) -> bool {
        let mut current = self.permits.load(Ordering::Relaxed);
        while current > 0 {
            match self.permits.compare_exchange_weak(
                current,
                current - 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
        false
    }

    /// Takes a permit, blocking until one is available.
    #[inline]
    pub fn acquire(&self) {
        if self.try_acquire() {
            return;
        }
        self.acquire_slow();
    }

    #[cold]
    fn acquire_slow(&self) {
        // Spin briefly before committing to a park.
        let backoff = Backoff::new();
        while !backoff.is_completed() {
            if self.try_acquire() {
                return;
            }
            backoff.snooze();
        }

        trace!("semaphore contended, parking");
        loop {
            {
                let mut queue = self.queue.locked();
                // Re-check with the queue locked: a release that ran before
                // we enqueued has already deposited its permit, and its
                // wakeup would otherwise be lost.
                if self.try_acquire() {
                    return;
                }
                queue.push(thread::current());
            }
            thread::park();
            if self.try_acquire() {
                return;
            }
            // Spurious wakeup, or the permit was taken by a fast-path
            // acquirer before we ran. Queue up again.
        }
    }

    /// Returns a permit and wakes the oldest waiter, if any.
    pub fn release(&self) {
        let waiter = {
            let mut queue = self.queue.locked();
            self.permits.fetch_add(1, Ordering::Release);
            queue.pop()
        };
        if let Some(thread) = waiter {
            thread.unpark();
        }
    }

    /// Racy snapshot of the available permit count, for diagnostics only.
    pub fn available(&self) -> usize {
        self.permits.load(Ordering::Relaxed)
    }
}
