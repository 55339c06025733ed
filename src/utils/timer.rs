//! Timing primitives for the sweep.
//!
//! This module provides:
//! - A [`Stopwatch`] abstraction so the sweep can be driven by a scripted
//!   clock in tests
//! - [`WallClock`], the monotonic implementation used for real runs
//! - [`DurationUnit`] truncation, matching how samples are stored
//! - Median selection for odd-sized sample sets

use crate::error::Error;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

// ============================================================================
// Stopwatch
// ============================================================================

/// Elapsed-time source for one timed phase.
pub trait Stopwatch {
    /// Capture the start point.
    fn start(&mut self);

    /// Time since the last `start`.
    fn elapsed(&mut self) -> Duration;
}

/// Monotonic wall-clock stopwatch backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch for WallClock {
    #[inline(always)]
    fn start(&mut self) {
        self.start = Instant::now();
    }

    #[inline(always)]
    fn elapsed(&mut self) -> Duration {
        self.start.elapsed()
    }
}

// ============================================================================
// Units
// ============================================================================

/// Unit samples are truncated to before storage and reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationUnit {
    Nanos,
    Micros,
    #[default]
    Millis,
    Secs,
}

impl DurationUnit {
    /// Whole units in `d`, truncating toward zero.
    pub fn count(self, d: Duration) -> u64 {
        let nanos = d.as_nanos();
        let whole = match self {
            Self::Nanos => nanos,
            Self::Micros => nanos / 1_000,
            Self::Millis => nanos / 1_000_000,
            Self::Secs => nanos / 1_000_000_000,
        };
        u64::try_from(whole).unwrap_or(u64::MAX)
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Nanos => "ns",
            Self::Micros => "us",
            Self::Millis => "ms",
            Self::Secs => "s",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DurationUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ns" => Ok(Self::Nanos),
            "us" | "µs" => Ok(Self::Micros),
            "ms" => Ok(Self::Millis),
            "s" => Ok(Self::Secs),
            other => Err(Error::UnknownUnit(other.to_string())),
        }
    }
}

// ============================================================================
// Median
// ============================================================================

/// Middle sample of an odd-sized set.
///
/// Only partially reorders `samples` (selection, not a full sort).
///
/// # Panics
/// If `samples` is empty or has even length. Run counts are validated to be
/// odd before any sampling starts.
pub fn median(samples: &mut [u64]) -> u64 {
    assert!(
        samples.len() % 2 == 1,
        "median needs an odd number of samples, got {}",
        samples.len()
    );
    let mid = samples.len() / 2;
    let (_, median, _) = samples.select_nth_unstable(mid);
    *median
}

// ============================================================================
// Scripted stopwatch for tests
// ============================================================================
