//! The randomness collaborator.
//!
//! The protocol only ever needs one operation: a uniform integer drawn
//! from an inclusive range. The source is injected at construction time
//! (seeded or OS-derived), never read from global state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// A uniform-integer-in-range source.
pub trait Entropy: Send {
    /// Draws a uniform integer from `range` (both ends inclusive).
    fn pick(&mut self, range: RangeInclusive<u64>) -> u64;
}

/// [`Entropy`] backed by a small fast PRNG.
pub struct SeededEntropy {
    rng: SmallRng,
}

impl SeededEntropy {
    /// Deterministic source for a given seed; identical seeds produce
    /// identical draw sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Entropy for SeededEntropy {
    fn pick(&mut self, range: RangeInclusive<u64>) -> u64 {
        self.rng.gen_range(range)
    }
}
