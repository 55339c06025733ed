//! Utility modules for timing and console output.

pub mod cpu_affinity;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use cpu_affinity::CpuPinGuard;
pub use timer::{median, DurationUnit, Stopwatch, WallClock};
