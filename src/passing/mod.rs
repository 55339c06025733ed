//! # By Value vs By Reference
//!
//! The timed call targets and the side work that surrounds them.
//!
//! All mutable state the measurement touches (random stream, work slots,
//! per-phase sums) lives in [`EvalContext`], which the sweep threads through
//! every call by `&mut`.

pub mod code;
#[cfg(test)]
pub mod test;

use crate::random::FauxRand;
use std::fmt;
use std::hint::black_box;

pub use code::{by_ref, by_val};

/// Number of accumulator slots touched by [`random_work`].
pub const WORK_SLOTS: usize = 16;

/// How the array crosses the call boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassMode {
    ByRef,
    ByVal,
}

impl PassMode {
    /// Report order: by-reference rows before by-value rows.
    pub const ALL: [PassMode; 2] = [Self::ByRef, Self::ByVal];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ByRef => "by ref",
            Self::ByVal => "by val",
        }
    }

    /// Short form used in CSV output
    pub const fn key(self) -> &'static str {
        match self {
            Self::ByRef => "by_ref",
            Self::ByVal => "by_val",
        }
    }
}

impl fmt::Display for PassMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State shared by every timed pass.
#[derive(Clone, Debug)]
pub struct EvalContext {
    pub rng: FauxRand,
    /// Never reset between combinations; values wrap freely.
    pub work: [u64; WORK_SLOTS],
    /// One loop sum per by-value phase, in sweep order.
    pub by_val_sums: Vec<u64>,
    /// One loop sum per by-reference phase, in sweep order.
    pub by_ref_sums: Vec<u64>,
}

impl EvalContext {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: FauxRand::new(seed),
            work: [0; WORK_SLOTS],
            by_val_sums: Vec::new(),
            by_ref_sums: Vec::new(),
        }
    }

    /// Fold the recorded loop sums and work slots into one value.
    ///
    /// The result goes through `black_box` so none of the timed loops can be
    /// proven dead.
    pub fn checksum(&self) -> u64 {
        let first_val = self.by_val_sums.first().copied().unwrap_or(0);
        let first_ref = self.by_ref_sums.first().copied().unwrap_or(0);
        let work = self.work.iter().fold(0u64, |acc, &w| acc ^ w);
        black_box(first_val.wrapping_add(first_ref) ^ work)
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(crate::random::DEFAULT_SEED)
    }
}

/// Side work done on every pass so the surrounding code can't be elided.
///
/// Independent of the array under test, so its cost cancels out against the
/// baseline.
#[inline]
pub fn random_work(ctx: &mut EvalContext) {
    let slot = ctx.rng.next_below(WORK_SLOTS as u64) as usize;
    let random = ctx.rng.next();
    ctx.work[slot] = ctx.work[slot].wrapping_add(random ^ (random << 1));
}
