//! The `Switchboard`: gate wiring for the three role protocols.
//!
//! Access rule over one shared list:
//!
//! - any number of searchers may read concurrently;
//! - any number of inserters may hold access concurrently with each other
//!   and with searchers, though their mutations take turns;
//! - a deleter requires that no searcher and no inserter is in, and while
//!   it runs nobody else may start.
//!
//! Two binary gate semaphores carry the rule: `no_search` is held exactly
//! while at least one searcher is in, `no_insert` exactly while at least
//! one inserter is in. Each of those roles drives its gate through a
//! [`Lightswitch`]; deleters take both raw gates in a fixed order and are
//! therefore also mutually exclusive with each other.

use crate::list::SharedList;
use crate::sync::{Lightswitch, Semaphore};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Tuning knobs for a simulation run.
///
/// Defaults mirror the classic exercise: one to five actors per role,
/// values in `0..=100`, one to three seconds of simulated work, one to
/// ten seconds of idling, a five second pause before spawning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// PRNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Per-role actor count range.
    pub population: RangeInclusive<u64>,
    /// Range inserted values are drawn from.
    pub value: RangeInclusive<u64>,
    /// Simulated work duration while access is held, in milliseconds.
    pub hold_ms: RangeInclusive<u64>,
    /// Idle duration between turns, in milliseconds.
    pub idle_ms: RangeInclusive<u64>,
    /// Pause between announcing populations and spawning, in milliseconds.
    pub start_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            population: 1..=5,
            value: 0..=100,
            hold_ms: 1000..=3000,
            idle_ms: 1000..=10_000,
            start_delay_ms: 5000,
        }
    }
}

/// The process-lifetime singleton coordinating the three roles.
///
/// All semaphores and switches are created once, open, with no members
/// in; they live as long as the board. Access is handed out as RAII
/// guards whose `Drop` releases in the mirror order of acquisition.
pub struct Switchboard {
    no_search: Arc<Semaphore>,
    no_insert: Arc<Semaphore>,
    insert_mutex: Semaphore,
    search_switch: Lightswitch<Arc<Semaphore>>,
    insert_switch: Lightswitch<Arc<Semaphore>>,
    list: RwLock<SharedList<i64>>,
}

impl Switchboard {
    /// Creates a board with an empty list and all gates open.
    pub fn new() -> Self {
        let no_search = Arc::new(Semaphore::new(1));
        let no_insert = Arc::new(Semaphore::new(1));
        Self {
            search_switch: Lightswitch::new(no_search.clone()),
            insert_switch: Lightswitch::new(no_insert.clone()),
            no_search,
            no_insert,
            insert_mutex: Semaphore::new(1),
            list: RwLock::new(SharedList::new()),
        }
    }

    /// Enters the searcher role, blocking while a deleter holds
    /// `no_search`. Concurrent searchers pass straight through.
    pub fn begin_search(&self) -> SearchGuard<'_> {
        self.search_switch.acquire();
        debug!(active = self.search_switch.active(), "searcher in");
        SearchGuard { board: self }
    }

    /// Enters the inserter role, blocking while a deleter holds
    /// `no_insert`, then takes the mutation lock. Concurrent inserters
    /// pass the gate together and queue only for the mutation.
    pub fn begin_insert(&self) -> InsertGuard<'_> {
        self.insert_switch.acquire();
        self.insert_mutex.acquire();
        debug!(active = self.insert_switch.active(), "inserter in");
        InsertGuard { board: self }
    }

    /// Enters the deleter role: waits out all searchers, then all
    /// inserters.
    ///
    /// Both gates are always taken in this order by the only role that
    /// takes both, so no circular wait can form. Holding `no_search` for
    /// the whole turn also keeps deleters mutually exclusive.
    pub fn begin_delete(&self) -> DeleteGuard<'_> {
        self.no_search.acquire();
        self.no_insert.acquire();
        debug!("deleter in");
        DeleteGuard { board: self }
    }

    /// Unguarded length snapshot, for diagnostics and tests.
    pub fn len(&self) -> usize {
        self.list.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Unguarded emptiness snapshot, for diagnostics and tests.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Switchboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access for one searcher; leaves the role on drop.
pub struct SearchGuard<'a> {
    board: &'a Switchboard,
}

impl SearchGuard<'_> {
    /// Reads the whole list in order. Restartable: every call begins at
    /// the head.
    pub fn snapshot(&self) -> Vec<i64> {
        self.board
            .list
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_vec()
    }
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        self.board.search_switch.release();
    }
}

/// Append access for one inserter; holds the mutation lock until drop.
pub struct InsertGuard<'a> {
    board: &'a Switchboard,
}

impl InsertGuard<'_> {
    /// Appends `value` at the tail, creating the head if the list is
    /// empty.
    pub fn append(&self, value: i64) {
        self.board
            .list
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(value);
    }
}

impl Drop for InsertGuard<'_> {
    fn drop(&mut self) {
        // Mirror of acquisition: mutation lock first, then the gate.
        self.board.insert_mutex.release();
        self.board.insert_switch.release();
    }
}

/// Exclusive access for one deleter; reopens both gates on drop.
pub struct DeleteGuard<'a> {
    board: &'a Switchboard,
}

impl DeleteGuard<'_> {
    /// Removes the tail node, returning its value; no-op on an empty
    /// list.
    pub fn remove_tail(&self) -> Option<i64> {
        self.board
            .list
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_back()
    }

    /// Removes the first node holding `value`; no-op if absent.
    pub fn remove_value(&self, value: i64) -> bool {
        self.board
            .list
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_value(&value)
    }

    /// Drops every node.
    pub fn clear(&self) {
        self.board
            .list
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Drop for DeleteGuard<'_> {
    fn drop(&mut self) {
        // Mirror of acquisition.
        self.board.no_insert.release();
        self.board.no_search.release();
    }
}
