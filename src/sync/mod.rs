//! Blocking primitives the role protocols are built from.
//!
//! Everything here is parking-based: a contended acquire spins briefly,
//! then parks on a FIFO wait queue and is unparked by the releasing
//! thread. No ordering is guaranteed beyond that best-effort FIFO.

pub mod lightswitch;
pub mod semaphore;
mod wait_queue;

pub use lightswitch::{Gate, Lightswitch, LightswitchGuard};
pub use semaphore::Semaphore;
