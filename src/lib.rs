//! # Param-Pass-Timing
//!
//! Measures what it costs to pass fixed-size arrays of unsigned integers by
//! value versus by reference, across element sizes of 1 to 8 bytes and
//! power-of-two array lengths.
//!
//! Each (element size, array size) combination is timed in three phases:
//! an inline baseline, calls taking `&RandArray`, and calls taking
//! `RandArray` by value. The median of several runs minus the median
//! baseline is reported per mode.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod passing;
pub mod random;
pub mod report;
pub mod sweep;
pub mod timing_data;
pub mod utils;

/// Re-export tui from utils
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::aggregate::{Element, ElementWidth, RandArray};
    pub use crate::config::{parse_args, CliOptions, SweepConfig};
    pub use crate::error::{Error, Result};
    pub use crate::passing::{by_ref, by_val, EvalContext, PassMode};
    pub use crate::random::FauxRand;
    pub use crate::report::{export_csv, write_report, ResultRow};
    pub use crate::sweep::{Progress, Sweep, SweepOutcome};
    pub use crate::timing_data::{PhaseTimes, TimingData};
    pub use crate::utils::timer::{DurationUnit, Stopwatch, WallClock};
}
