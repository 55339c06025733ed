//! # Parameter Passing Sweep
//!
//! Drives the measurement: for every run, element width and array size it
//! builds one [`RandArray`] and times three phases of `passes` calls each:
//!
//! 1. baseline: the work done inline, no call boundary
//! 2. by reference: through [`by_ref`]
//! 3. by value: through [`by_val`]
//!
//! Array sizes are walked at runtime; each size is dispatched to its own
//! monomorphized `RandArray<T, N>` code path.

#[cfg(test)]
pub mod test;

use crate::aggregate::{Element, ElementWidth, RandArray};
use crate::config::SweepConfig;
use crate::error::Result;
use crate::passing::{by_ref, by_val, random_work, EvalContext};
use crate::timing_data::{PhaseTimes, TimingData};
use crate::utils::cpu_affinity::CpuPinGuard;
use crate::utils::timer::{DurationUnit, Stopwatch};
use std::hint::black_box;
use std::time::Duration;

/// Progress notifications emitted while the sweep runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// A new run over all widths and sizes begins.
    Run { run: usize, runs: usize },
    /// One (width, size) combination is about to be timed.
    Step {
        run: usize,
        width: ElementWidth,
        array_size: usize,
    },
}

/// Result of a finished sweep.
#[derive(Debug)]
pub struct SweepOutcome {
    pub data: TimingData,
    /// Folded loop sums; keeps the timed loops observable.
    pub checksum: u64,
    /// Core the sweep ran pinned to, if pinning succeeded.
    pub pinned_core: Option<usize>,
}

/// The sweep driver. Owns all mutable measurement state.
pub struct Sweep<S: Stopwatch> {
    config: SweepConfig,
    ctx: EvalContext,
    stopwatch: S,
    data: TimingData,
}

impl<S: Stopwatch> Sweep<S> {
    /// Validate `config` and set up an empty timing table.
    pub fn new(config: SweepConfig, stopwatch: S) -> Result<Self> {
        let config = config.normalized()?;
        let data = TimingData::new(
            &config.element_widths,
            config.size_count(),
            config.runs,
            config.unit,
        );
        Ok(Self {
            ctx: EvalContext::new(config.seed),
            config,
            stopwatch,
            data,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run every (run, width, size) combination.
    pub fn run(self) -> SweepOutcome {
        self.run_with(|_| {})
    }

    /// Same as [`run`](Self::run), reporting progress to `on_progress`.
    pub fn run_with<F: FnMut(Progress)>(mut self, mut on_progress: F) -> SweepOutcome {
        let pin = self.config.pin_cpu.then(CpuPinGuard::new);
        let pinned_core = pin.as_ref().and_then(CpuPinGuard::core_id);

        let runs = self.config.runs;
        let widths = self.config.element_widths.clone();
        let sizes: Vec<usize> = self.config.array_sizes().collect();

        for run in 0..runs {
            on_progress(Progress::Run { run, runs });
            for &width in &widths {
                for &array_size in &sizes {
                    on_progress(Progress::Step {
                        run,
                        width,
                        array_size,
                    });
                    let times = eval_width(
                        &mut self.ctx,
                        &mut self.stopwatch,
                        self.config.passes,
                        self.config.unit,
                        width,
                        array_size,
                    );
                    self.data.set_times(width, array_size, run, times);
                }
            }
        }
        drop(pin);

        SweepOutcome {
            checksum: self.ctx.checksum(),
            data: self.data,
            pinned_core,
        }
    }
}

// ============================================================================
// Dispatch: (width, size) -> RandArray<T, N>
// ============================================================================

fn eval_width<S: Stopwatch>(
    ctx: &mut EvalContext,
    sw: &mut S,
    passes: usize,
    unit: DurationUnit,
    width: ElementWidth,
    array_size: usize,
) -> PhaseTimes {
    match width {
        ElementWidth::U8 => eval_size::<u8, S>(ctx, sw, passes, unit, array_size),
        ElementWidth::U16 => eval_size::<u16, S>(ctx, sw, passes, unit, array_size),
        ElementWidth::U32 => eval_size::<u32, S>(ctx, sw, passes, unit, array_size),
        ElementWidth::U64 => eval_size::<u64, S>(ctx, sw, passes, unit, array_size),
    }
}

macro_rules! dispatch_size {
    ($t:ty, $s:ty, $size:expr, $args:tt, [$($n:tt),+]) => {
        match $size {
            $( $n => eval::<$t, $n, $s> $args, )+
            other => unreachable!(
                "array size {} has no code path; the config limit is {}",
                other,
                crate::config::MAX_SUPPORTED_ARRAY_SIZE
            ),
        }
    };
}

fn eval_size<T: Element, S: Stopwatch>(
    ctx: &mut EvalContext,
    sw: &mut S,
    passes: usize,
    unit: DurationUnit,
    array_size: usize,
) -> PhaseTimes {
    dispatch_size!(
        T,
        S,
        array_size,
        (ctx, sw, passes, unit),
        [1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384]
    )
}

/// Build one array and time the three phases over it.
///
/// Kept out of line so each size gets its own stack frame.
#[inline(never)]
fn eval<T: Element, const N: usize, S: Stopwatch>(
    ctx: &mut EvalContext,
    sw: &mut S,
    passes: usize,
    unit: DurationUnit,
) -> PhaseTimes {
    let arr = RandArray::<T, N>::new(&mut ctx.rng);
    debug_assert_eq!(std::mem::size_of_val(&arr), N * std::mem::size_of::<T>());

    let baseline = time_baseline(ctx, sw, passes, &arr);
    let by_ref = time_by_ref(ctx, sw, passes, &arr);
    let by_val = time_by_val(ctx, sw, passes, &arr);

    PhaseTimes {
        baseline: unit.count(baseline),
        by_ref: unit.count(by_ref),
        by_val: unit.count(by_val),
    }
}

// ============================================================================
// Timed phases
// ============================================================================

/// The by-ref/by-val work done directly inline; no array crosses a call.
fn time_baseline<T: Element, const N: usize, S: Stopwatch>(
    ctx: &mut EvalContext,
    sw: &mut S,
    passes: usize,
    arr: &RandArray<T, N>,
) -> Duration {
    let mut sum = 0u64;
    sw.start();
    for _ in 0..passes {
        random_work(ctx);
        sum = sum.wrapping_add(arr.compute_value(&mut ctx.rng));
    }
    let elapsed = sw.elapsed();
    black_box(sum);
    elapsed
}

fn time_by_ref<T: Element, const N: usize, S: Stopwatch>(
    ctx: &mut EvalContext,
    sw: &mut S,
    passes: usize,
    arr: &RandArray<T, N>,
) -> Duration {
    let mut sum = 0u64;
    sw.start();
    for _ in 0..passes {
        sum = sum.wrapping_add(by_ref(ctx, black_box(arr)));
    }
    let elapsed = sw.elapsed();
    ctx.by_ref_sums.push(sum);
    elapsed
}

fn time_by_val<T: Element, const N: usize, S: Stopwatch>(
    ctx: &mut EvalContext,
    sw: &mut S,
    passes: usize,
    arr: &RandArray<T, N>,
) -> Duration {
    let mut sum = 0u64;
    sw.start();
    for _ in 0..passes {
        // arr copied
        sum = sum.wrapping_add(by_val(ctx, black_box(*arr)));
    }
    let elapsed = sw.elapsed();
    ctx.by_val_sums.push(sum);
    elapsed
}
