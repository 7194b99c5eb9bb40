//! Structured protocol events and the output hook.
//!
//! The core never formats or prints text. Every state transition is
//! reported through an [`EventSink`], and a channel-backed sink is
//! provided so one consumer can serialize output on its own — the
//! message-passing replacement for guarding stdout with a semaphore.

use serde::Serialize;
use std::sync::mpsc;

/// One of the three actor classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Reads the whole list; any number may run concurrently.
    Searcher,
    /// Appends to the tail; concurrent with searchers, mutation serialized.
    Inserter,
    /// Removes the tail; excludes every other actor.
    Deleter,
}

impl Role {
    /// Short uppercase tag used in console output (`SEARCH`, `INSERT`,
    /// `DELETE`).
    pub fn label(self) -> &'static str {
        match self {
            Role::Searcher => "SEARCH",
            Role::Inserter => "INSERT",
            Role::Deleter => "DELETE",
        }
    }
}

/// Point in an actor's per-turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// About to block on the role's entry gates.
    Waiting,
    /// Holding access and operating on the list.
    Active,
    /// Released access, idling before the next turn.
    Idle,
}

/// What an actor did while active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Payload {
    /// A searcher's ordered read of the whole list.
    Snapshot(Vec<i64>),
    /// The value an inserter appended.
    Inserted(i64),
    /// The tail value a deleter removed, or `None` on an empty list.
    Removed(Option<i64>),
}

/// A record handed to the output collaborator at each transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProtocolEvent {
    /// Startup announcement of the chosen per-role populations.
    Population {
        /// Number of searcher actors spawned.
        searchers: usize,
        /// Number of inserter actors spawned.
        inserters: usize,
        /// Number of deleter actors spawned.
        deleters: usize,
    },
    /// An actor moved through its state machine.
    Transition {
        /// The actor's role.
        role: Role,
        /// Identifier of the actor within its role, starting at 0.
        actor: usize,
        /// The state entered.
        stage: Stage,
        /// Role-specific detail, present for `Active` transitions.
        payload: Option<Payload>,
    },
}

impl ProtocolEvent {
    /// Convenience constructor for a state transition record.
    pub fn transition(role: Role, actor: usize, stage: Stage, payload: Option<Payload>) -> Self {
        ProtocolEvent::Transition {
            role,
            actor,
            stage,
            payload,
        }
    }
}

/// The hook the core invokes at every state transition.
///
/// Implementations must be cheap and non-blocking; actors call this while
/// holding protocol gates.
pub trait EventSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: ProtocolEvent);
}

/// Discards every event. Useful in tests and benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: ProtocolEvent) {}
}

/// Sink half of [`channel_sink`]; forwards events to the consumer.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<ProtocolEvent>,
}

impl EventSink for ChannelSink {
    fn record(&self, event: ProtocolEvent) {
        // The receiver disconnecting just means nobody is listening
        // anymore; the protocol does not care.
        let _ = self.tx.send(event);
    }
}

/// Creates a message-passing sink: actors send, one consumer receives and
/// serializes output however it likes.
pub fn channel_sink() -> (ChannelSink, mpsc::Receiver<ProtocolEvent>) {
    let (tx, rx) = mpsc::channel();
    (ChannelSink { tx }, rx)
}
