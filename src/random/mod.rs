//! # Faux Random
//!
//! Fast linear congruential generator used to fill test arrays and to keep
//! the optimizer from folding the timed work into constants.
//!
//! Not very random and definitely not secure. Useful for timing evaluations
//! only.

use rand::rand_core::impls;
use rand::RngCore;

/// Seed used when none is given; keeps reports comparable across runs.
pub const DEFAULT_SEED: u64 = 42;

const MULTIPLIER: u64 = 214_013;
const INCREMENT: u64 = 2_531_011;

/// Seedable pseudo-random stream: `next = next * A + C`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FauxRand {
    next: u64,
}

impl FauxRand {
    pub fn new(seed: u64) -> Self {
        Self { next: seed }
    }

    /// Reset the stream to `seed`.
    pub fn seed(&mut self, seed: u64) {
        self.next = seed;
    }

    /// Advance the stream and return the new state.
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn next(&mut self) -> u64 {
        self.next = self.next.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.next
    }

    /// Draw a value in `[0, bound)`.
    #[inline(always)]
    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

impl Default for FauxRand {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for FauxRand {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}
