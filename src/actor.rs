//! The three actor loops.
//!
//! Each actor repeats the same turn shape forever: announce `Waiting`,
//! block into its role, act on the list, announce `Active` with what it
//! did, hold access for a randomized duration, leave the role, announce
//! `Idle` and sleep before the next turn. The loops exit cooperatively
//! when the shared stop flag is raised, checked once per turn.

use crate::board::{SimConfig, Switchboard};
use crate::entropy::Entropy;
use crate::events::{EventSink, Payload, ProtocolEvent, Role, Stage};
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::trace;

fn sleep_in(entropy: &mut dyn Entropy, range: &RangeInclusive<u64>) {
    let millis = entropy.pick(range.clone());
    if millis > 0 {
        thread::sleep(Duration::from_millis(millis));
    }
}

/// Runs one searcher until `stop` is raised.
pub fn run_searcher(
    id: usize,
    board: &Switchboard,
    sink: &dyn EventSink,
    entropy: &mut dyn Entropy,
    config: &SimConfig,
    stop: &AtomicBool,
) {
    while !stop.load(Ordering::Relaxed) {
        sink.record(ProtocolEvent::transition(Role::Searcher, id, Stage::Waiting, None));
        let guard = board.begin_search();
        let contents = guard.snapshot();
        trace!(id, len = contents.len(), "search turn");
        sink.record(ProtocolEvent::transition(
            Role::Searcher,
            id,
            Stage::Active,
            Some(Payload::Snapshot(contents)),
        ));
        sleep_in(entropy, &config.hold_ms);
        drop(guard);
        sink.record(ProtocolEvent::transition(Role::Searcher, id, Stage::Idle, None));
        if stop.load(Ordering::Relaxed) {
            break;
        }
        sleep_in(entropy, &config.idle_ms);
    }
}

/// Runs one inserter until `stop` is raised.
#[allow(clippy::cast_possible_wrap)]
pub fn run_inserter(
    id: usize,
    board: &Switchboard,
    sink: &dyn EventSink,
    entropy: &mut dyn Entropy,
    config: &SimConfig,
    stop: &AtomicBool,
) {
    while !stop.load(Ordering::Relaxed) {
        let value = entropy.pick(config.value.clone()) as i64;
        sink.record(ProtocolEvent::transition(Role::Inserter, id, Stage::Waiting, None));
        let guard = board.begin_insert();
        guard.append(value);
        trace!(id, value, "insert turn");
        sink.record(ProtocolEvent::transition(
            Role::Inserter,
            id,
            Stage::Active,
            Some(Payload::Inserted(value)),
        ));
        sleep_in(entropy, &config.hold_ms);
        drop(guard);
        sink.record(ProtocolEvent::transition(Role::Inserter, id, Stage::Idle, None));
        if stop.load(Ordering::Relaxed) {
            break;
        }
        sleep_in(entropy, &config.idle_ms);
    }
}

/// Runs one deleter until `stop` is raised.
pub fn run_deleter(
    id: usize,
    board: &Switchboard,
    sink: &dyn EventSink,
    entropy: &mut dyn Entropy,
    config: &SimConfig,
    stop: &AtomicBool,
) {
    while !stop.load(Ordering::Relaxed) {
        sink.record(ProtocolEvent::transition(Role::Deleter, id, Stage::Waiting, None));
        let guard = board.begin_delete();
        let removed = guard.remove_tail();
        trace!(id, ?removed, "delete turn");
        sink.record(ProtocolEvent::transition(
            Role::Deleter,
            id,
            Stage::Active,
            Some(Payload::Removed(removed)),
        ));
        sleep_in(entropy, &config.hold_ms);
        drop(guard);
        sink.record(ProtocolEvent::transition(Role::Deleter, id, Stage::Idle, None));
        if stop.load(Ordering::Relaxed) {
            break;
        }
        sleep_in(entropy, &config.idle_ms);
    }
}
