use crossbeam_utils::Backoff;
use std::cell::UnsafeCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::Thread;

/// A FIFO queue of parked threads.
///
/// A small spinlock protects the queue; every critical section is a couple
/// of pointer shuffles, so the lock hold times are tiny. Waiters are woken
/// in arrival order, which is the best-effort FIFO the semaphore promises.
pub(crate) struct WaitQueue {
    lock: AtomicBool,
    waiters: UnsafeCell<VecDeque<Thread>>,
}

// Safety: `waiters` is only touched through `WaitQueueGuard`, i.e. while
// `lock` is held.
unsafe impl Sync for WaitQueue {}
unsafe impl Send for WaitQueue {}

impl WaitQueue {
    pub(crate) const fn new() -> Self {
        Self {
            lock: AtomicBool::new(false),
            waiters: UnsafeCell::new(VecDeque::new()),
        }
    }

    /// Spins until the queue lock is taken and returns an access guard.
    pub(crate) fn locked(&self) -> WaitQueueGuard<'_> {
        let backoff = Backoff::new();
        while self.lock.swap(true, Ordering::Acquire) {
            backoff.snooze();
        }
        WaitQueueGuard { queue: self }
    }
}

/// Exclusive access to the waiter list; releases the spinlock on drop.
pub(crate) struct WaitQueueGuard<'a> {
    queue: &'a WaitQueue,
}

impl WaitQueueGuard<'_> {
    pub(crate) fn push(&mut self, thread: Thread) {
        // Safety: the guard holds the queue lock.
        unsafe { (*self.queue.waiters.get()).push_back(thread) }
    }

    pub(crate) fn pop(&mut self) -> Option<Thread> {
        // Safety: the guard holds the queue lock.
        unsafe { (*self.queue.waiters.get()).pop_front() }
    }
}

impl Drop for WaitQueueGuard<'_> {
    fn drop(&mut self) {
        self.queue.lock.store(false, Ordering::Release);
    }
}
