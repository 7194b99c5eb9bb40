//! The lightswitch: a role-counting gate.
//!
//! The first member of a role to arrive "turns the light off" for
//! competing roles by closing a shared gate; the last member to leave
//! turns it back on. Members of the same role never block each other at
//! the switch (beyond the momentary counter update), which is what lets
//! any number of searchers, or any number of inserters, run side by side
//! while still excluding deleters.

use super::semaphore::Semaphore;
use std::cell::UnsafeCell;
use std::sync::Arc;

/// A gate a lightswitch can close and reopen.
///
/// In the running protocol the gate is a binary [`Semaphore`]; tests
/// substitute recording gates to observe switch behavior in isolation.
pub trait Gate {
    /// Closes the gate, blocking until it can be held.
    fn close(&self);
    /// Reopens the gate.
    fn open(&self);
}

impl Gate for Semaphore {
    fn close(&self) {
        self.acquire();
    }

    fn open(&self) {
        self.release();
    }
}

impl<G: Gate + ?Sized> Gate for &G {
    fn close(&self) {
        (**self).close();
    }

    fn open(&self) {
        (**self).open();
    }
}

impl<G: Gate + ?Sized> Gate for Arc<G> {
    fn close(&self) {
        (**self).close();
    }

    fn open(&self) {
        (**self).open();
    }
}

/// A role-counting gate (the "lightswitch" idiom).
///
/// Tracks how many members of one role are currently in. The 0→1
/// transition closes the shared gate and the 1→0 transition reopens it;
/// the counter update and the gate operation are indivisible with respect
/// to other members of the same role, serialized by an internal binary
/// semaphore.
///
/// Generic over the gate so the switch can be tested against a mock and
/// wired to a shared `Arc<Semaphore>` in production.
pub struct Lightswitch<G: Gate> {
    gate: G,
    guard: Semaphore,
    counter: UnsafeCell<usize>,
}

// Safety: `counter` is only touched while `guard` is held.
unsafe impl<G: Gate + Send> Send for Lightswitch<G> {}
unsafe impl<G: Gate + Sync> Sync for Lightswitch<G> {}

impl<G: Gate> Lightswitch<G> {
    /// Creates a lightswitch over `gate` with no members in.
    pub const fn new(gate: G) -> Self {
        Self {
            gate,
            guard: Semaphore::new(1),
            counter: UnsafeCell::new(0),
        }
    }

    /// Registers the caller as in, closing the gate on the 0→1 transition.
    ///
    /// Blocks only while the gate itself is held by a competing role (or
    /// momentarily on the counter guard). The gate is taken while the
    /// guard is still held, so same-role latecomers queue on the guard
    /// behind the first entrant instead of racing it for the gate.
    pub fn acquire(&self) {
        self.guard.acquire();
        // Safety: `guard` is held.
        let counter = unsafe { &mut *self.counter.get() };
        *counter += 1;
        if *counter == 1 {
            self.gate.close();
        }
        self.guard.release();
    }

    /// Deregisters the caller, reopening the gate on the 1→0 transition.
    ///
    /// # Panics
    ///
    /// Panics if called more times than [`acquire`](Self::acquire); the
    /// counter never goes negative.
    pub fn release(&self) {
        self.guard.acquire();
        // Safety: `guard` is held.
        let counter = unsafe { &mut *self.counter.get() };
        assert!(*counter > 0, "lightswitch released more times than acquired");
        *counter -= 1;
        if *counter == 0 {
            self.gate.open();
        }
        self.guard.release();
    }

    /// Acquires and returns a guard that releases on drop.
    pub fn enter(&self) -> LightswitchGuard<'_, G> {
        self.acquire();
        LightswitchGuard { switch: self }
    }

    /// Number of members currently in.
    pub fn active(&self) -> usize {
        self.guard.acquire();
        // Safety: `guard` is held.
        let count = unsafe { *self.counter.get() };
        self.guard.release();
        count
    }
}

/// Membership in a lightswitch's role; releases the switch on drop.
pub struct LightswitchGuard<'a, G: Gate> {
    switch: &'a Lightswitch<G>,
}

impl<G: Gate> Drop for LightswitchGuard<'_, G> {
    fn drop(&mut self) {
        self.switch.release();
    }
}
