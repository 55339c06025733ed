//! Timing table: one sample per (element width, array size, run) for each
//! of the three phases.

use crate::aggregate::ElementWidth;
use crate::error::{Error, Result};
use crate::passing::PassMode;
use crate::report::ResultRow;
use crate::utils::timer::{median, DurationUnit};

/// The three samples recorded for one (width, size, run) cell, already
/// truncated to the table's unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimes {
    pub baseline: u64,
    pub by_ref: u64,
    pub by_val: u64,
}

/// Three parallel tables sharing one key space.
///
/// Layout is `[width][size exponent][run]`, flattened. Widths are kept in
/// ascending order so report rows come out sorted by element size.
#[derive(Clone, Debug)]
pub struct TimingData {
    widths: Vec<ElementWidth>,
    size_count: usize,
    runs: usize,
    unit: DurationUnit,
    baselines: Vec<u64>,
    by_refs: Vec<u64>,
    by_vals: Vec<u64>,
    recorded: Vec<bool>,
}

impl TimingData {
    /// `size_count` array sizes, `1 << 0` through `1 << (size_count - 1)`.
    pub fn new(widths: &[ElementWidth], size_count: usize, runs: usize, unit: DurationUnit) -> Self {
        let mut widths = widths.to_vec();
        widths.sort_unstable();
        widths.dedup();

        let cells = widths.len() * size_count * runs;
        Self {
            widths,
            size_count,
            runs,
            unit,
            baselines: vec![0; cells],
            by_refs: vec![0; cells],
            by_vals: vec![0; cells],
            recorded: vec![false; cells],
        }
    }

    pub fn unit(&self) -> DurationUnit {
        self.unit
    }

    pub fn widths(&self) -> &[ElementWidth] {
        &self.widths
    }

    pub fn cell_count(&self) -> usize {
        self.recorded.len()
    }

    fn cell_start(&self, width: ElementWidth, size_idx: usize) -> Option<usize> {
        let width_idx = self.widths.iter().position(|&w| w == width)?;
        if size_idx >= self.size_count {
            return None;
        }
        Some((width_idx * self.size_count + size_idx) * self.runs)
    }

    /// Record the three phase samples for one cell.
    ///
    /// `array_size` must be a power of two below the table's maximum.
    ///
    /// # Panics
    /// If the key lies outside the table. The sweep only generates keys
    /// from the same configuration the table was built from.
    pub fn set_times(&mut self, width: ElementWidth, array_size: usize, run: usize, times: PhaseTimes) {
        assert!(array_size.is_power_of_two(), "array size {} is not a power of two", array_size);
        let size_idx = array_size.trailing_zeros() as usize;
        let start = self
            .cell_start(width, size_idx)
            .filter(|_| run < self.runs);
        let Some(start) = start else {
            panic!(
                "cell ({:?}, {}, run {}) outside the timing table",
                width, array_size, run
            );
        };

        let idx = start + run;
        self.baselines[idx] = times.baseline;
        self.by_refs[idx] = times.by_ref;
        self.by_vals[idx] = times.by_val;
        self.recorded[idx] = true;
    }

    pub fn get_times(&self, width: ElementWidth, array_size: usize, run: usize) -> Option<PhaseTimes> {
        if !array_size.is_power_of_two() || run >= self.runs {
            return None;
        }
        let idx = self.cell_start(width, array_size.trailing_zeros() as usize)? + run;
        self.recorded[idx].then(|| PhaseTimes {
            baseline: self.baselines[idx],
            by_ref: self.by_refs[idx],
            by_val: self.by_vals[idx],
        })
    }

    pub fn is_complete(&self) -> bool {
        self.recorded.iter().all(|&r| r)
    }

    fn samples(&self, mode: Option<PassMode>, start: usize) -> Vec<u64> {
        let table = match mode {
            None => &self.baselines,
            Some(PassMode::ByRef) => &self.by_refs,
            Some(PassMode::ByVal) => &self.by_vals,
        };
        table[start..start + self.runs].to_vec()
    }

    /// Median-minus-baseline rows in report order: all by-ref rows, then all
    /// by-val rows; within each, element size ascending, then array size
    /// ascending.
    pub fn results(&self) -> Result<Vec<ResultRow>> {
        let missing = self.recorded.iter().filter(|&&r| !r).count();
        if missing > 0 {
            return Err(Error::IncompleteTable {
                missing,
                total: self.recorded.len(),
            });
        }

        let mut rows = Vec::with_capacity(PassMode::ALL.len() * self.widths.len() * self.size_count);
        for mode in PassMode::ALL {
            for &width in &self.widths {
                for size_idx in 0..self.size_count {
                    // cell_start can't miss: both indices come from the table itself
                    let Some(start) = self.cell_start(width, size_idx) else {
                        continue;
                    };
                    let baseline = median(&mut self.samples(None, start));
                    let time = median(&mut self.samples(Some(mode), start));
                    rows.push(ResultRow {
                        mode,
                        array_size: 1usize << size_idx,
                        elem_size: width.size_bytes(),
                        delta: (time as i64).wrapping_sub(baseline as i64),
                    });
                }
            }
        }
        Ok(rows)
    }
}
