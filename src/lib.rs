//! # `lamplist` — three-role lightswitch coordination over a shared list
//!
//! A generalization of the readers/writers problem to three actor
//! classes sharing one mutable singly linked list:
//!
//! - **searchers** read the list; any number run concurrently;
//! - **inserters** append at the tail; they run concurrently with each
//!   other and with searchers, but their mutations take turns;
//! - **deleters** remove the tail; a deleter runs only when no searcher
//!   and no inserter is in, and blocks all of them while it runs.
//!
//! The coordination is carried by the **lightswitch** idiom from the
//! Little Book of Semaphores: a role-counting gate that closes a shared
//! binary semaphore when the first member of a role enters and reopens it
//! when the last one leaves. Searchers drive a lightswitch over the
//! `no_search` gate, inserters one over `no_insert`; deleters take both
//! raw gates in a fixed order (which also makes deleters mutually
//! exclusive with each other, a deliberate property of the classic
//! formulation that this crate preserves).
//!
//! ## Layers
//!
//! 1. [`sync`] — parking-based [`Semaphore`] and the generic
//!    [`Lightswitch`], independently testable primitives.
//! 2. [`SharedList`] — the uniquely-owned node chain, iterative
//!    operations, no locking of its own.
//! 3. [`Switchboard`] — wires gates and switches into the three role
//!    protocols, handing out RAII guards.
//! 4. [`actor`] loops and the [`Supervisor`] — infinite per-thread role
//!    turns, populations drawn from the injected [`Entropy`] source,
//!    every transition reported through an [`EventSink`].
//!
//! ## Example
//!
//! ```rust
//! use lamplist::Switchboard;
//!
//! let board = Switchboard::new();
//! {
//!     let insert = board.begin_insert();
//!     insert.append(7);
//!     insert.append(9);
//! }
//! {
//!     let search = board.begin_search();
//!     assert_eq!(search.snapshot(), vec![7, 9]);
//! }
//! let delete = board.begin_delete();
//! assert_eq!(delete.remove_tail(), Some(9));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod board;
pub mod entropy;
pub mod events;
pub mod list;
pub mod supervisor;
pub mod sync;

pub use board::{DeleteGuard, InsertGuard, SearchGuard, SimConfig, Switchboard};
pub use entropy::{Entropy, SeededEntropy};
pub use events::{channel_sink, ChannelSink, EventSink, NullSink, Payload, ProtocolEvent, Role, Stage};
pub use list::SharedList;
pub use supervisor::{RoleCounts, Supervisor};
pub use sync::{Gate, Lightswitch, LightswitchGuard, Semaphore};
