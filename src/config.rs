//! Sweep configuration and command-line parsing.

use crate::aggregate::ElementWidth;
use crate::error::{Error, Result};
use crate::random::DEFAULT_SEED;
use crate::utils::timer::DurationUnit;

/// Largest accepted `max_array_size`. Sizes up to half of this have a
/// specialized code path in the sweep.
pub const MAX_SUPPORTED_ARRAY_SIZE: usize = 1 << 15;

/// Default `max_array_size`: evaluates arrays of 1 through 2048 elements.
/// Passing by value usually starts to cost around 256 elements.
pub const DEFAULT_MAX_ARRAY_SIZE: usize = 4096;

/// Default run count: 3 in debug builds, 31 otherwise.
pub const DEFAULT_RUNS: usize = if cfg!(debug_assertions) { 3 } else { 31 };

/// Default passes per phase: 100 000 in debug builds, 10^8 otherwise.
pub const DEFAULT_PASSES: usize = if cfg!(debug_assertions) {
    100_000
} else {
    100_000_000
};

/// Configuration for one sweep.
///
/// Rule of thumb: tune `runs` and `passes` so a full sweep takes minutes to
/// hours. More runs reduce variance; the median run is reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    /// Repetitions of the whole sweep. Must be odd.
    pub runs: usize,
    /// Calls per timed phase.
    pub passes: usize,
    /// Power of two; sizes 1, 2, 4, .. `max_array_size / 2` are evaluated.
    pub max_array_size: usize,
    /// Element widths to evaluate, ascending.
    pub element_widths: Vec<ElementWidth>,
    /// Seed for the faux random stream.
    pub seed: u64,
    /// Unit samples are truncated to.
    pub unit: DurationUnit,
    /// Pin the sweep thread to its current core.
    pub pin_cpu: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            passes: DEFAULT_PASSES,
            max_array_size: DEFAULT_MAX_ARRAY_SIZE,
            element_widths: ElementWidth::ALL.to_vec(),
            seed: DEFAULT_SEED,
            unit: DurationUnit::default(),
            pin_cpu: cfg!(feature = "pin_cpu"),
        }
    }
}

impl SweepConfig {
    /// Check every invariant the median method depends on.
    pub fn validate(&self) -> Result<()> {
        if self.runs % 2 == 0 {
            return Err(Error::EvenRunCount(self.runs));
        }
        if self.passes == 0 {
            return Err(Error::ZeroPasses);
        }
        if !self.max_array_size.is_power_of_two() {
            return Err(Error::MaxSizeNotPowerOfTwo(self.max_array_size));
        }
        if self.max_array_size < 2 {
            return Err(Error::MaxSizeTooSmall(self.max_array_size));
        }
        if self.max_array_size > MAX_SUPPORTED_ARRAY_SIZE {
            return Err(Error::MaxSizeTooLarge {
                size: self.max_array_size,
                limit: MAX_SUPPORTED_ARRAY_SIZE,
            });
        }
        if self.element_widths.is_empty() {
            return Err(Error::NoElementWidths);
        }
        Ok(())
    }

    /// Sort and dedup widths, then validate.
    pub fn normalized(mut self) -> Result<Self> {
        self.element_widths.sort_unstable();
        self.element_widths.dedup();
        self.validate()?;
        Ok(self)
    }

    /// Number of array sizes evaluated: log2(max_array_size).
    pub fn size_count(&self) -> usize {
        self.max_array_size.trailing_zeros() as usize
    }

    /// 1, 2, 4, .. max_array_size / 2
    pub fn array_sizes(&self) -> impl Iterator<Item = usize> {
        (0..self.size_count()).map(|exp| 1usize << exp)
    }
}

/// Everything the command line can set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config: SweepConfig,
    pub csv_path: Option<String>,
    pub quiet: bool,
    pub show_help: bool,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let value = value.ok_or_else(|| Error::InvalidArgument(format!("{} needs a value", flag)))?;
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{} got '{}'", flag, value)))
}

/// Parse arguments (without the program name) on top of the defaults.
///
/// The returned config is normalized and validated unless `--help` was given.
pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--help" | "-h" => opts.show_help = true,
            "--quiet" | "-q" => opts.quiet = true,
            "--no-pin" => opts.config.pin_cpu = false,
            "--runs" => {
                opts.config.runs = parse_value(flag, value)?;
                i += 1;
            }
            "--passes" => {
                opts.config.passes = parse_value(flag, value)?;
                i += 1;
            }
            "--max-size" => {
                opts.config.max_array_size = parse_value(flag, value)?;
                i += 1;
            }
            "--seed" => {
                opts.config.seed = parse_value(flag, value)?;
                i += 1;
            }
            "--unit" => {
                opts.config.unit = parse_value::<String>(flag, value)?.parse()?;
                i += 1;
            }
            "--widths" => {
                let list: String = parse_value(flag, value)?;
                opts.config.element_widths = list
                    .split(',')
                    .map(|s| {
                        s.trim()
                            .parse::<usize>()
                            .map_err(|_| Error::InvalidArgument(format!("--widths got '{}'", s)))
                            .and_then(ElementWidth::from_size_bytes)
                    })
                    .collect::<Result<Vec<_>>>()?;
                i += 1;
            }
            "--csv" => {
                opts.csv_path = Some(parse_value(flag, value)?);
                i += 1;
            }
            other => return Err(Error::InvalidArgument(format!("unknown option: {}", other))),
        }
        i += 1;
    }

    if !opts.show_help {
        opts.config = opts.config.normalized()?;
    }
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_valid() {
        let config = SweepConfig::default();
        config.validate().unwrap();
        assert_eq!(config.runs % 2, 1);
        assert_eq!(config.size_count(), 12);
        assert_eq!(config.array_sizes().last(), Some(2048));
        assert_eq!(config.element_widths, ElementWidth::ALL.to_vec());
    }

    #[test]
    fn test_validation_errors() {
        let base = SweepConfig::default();

        let even = SweepConfig { runs: 4, ..base.clone() };
        assert!(matches!(even.validate(), Err(Error::EvenRunCount(4))));

        let zero_runs = SweepConfig { runs: 0, ..base.clone() };
        assert!(matches!(zero_runs.validate(), Err(Error::EvenRunCount(0))));

        let no_passes = SweepConfig { passes: 0, ..base.clone() };
        assert!(matches!(no_passes.validate(), Err(Error::ZeroPasses)));

        let odd_size = SweepConfig { max_array_size: 100, ..base.clone() };
        assert!(matches!(odd_size.validate(), Err(Error::MaxSizeNotPowerOfTwo(100))));

        let tiny = SweepConfig { max_array_size: 1, ..base.clone() };
        assert!(matches!(tiny.validate(), Err(Error::MaxSizeTooSmall(1))));

        let huge = SweepConfig { max_array_size: 1 << 16, ..base.clone() };
        assert!(matches!(huge.validate(), Err(Error::MaxSizeTooLarge { .. })));

        let no_widths = SweepConfig { element_widths: Vec::new(), ..base };
        assert!(matches!(no_widths.validate(), Err(Error::NoElementWidths)));
    }

    #[test]
    fn test_smallest_sweep() {
        let config = SweepConfig { max_array_size: 2, ..SweepConfig::default() };
        config.validate().unwrap();
        assert_eq!(config.array_sizes().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_parse_args() {
        let opts = parse_args(&args(&[
            "--runs", "5", "--passes", "10", "--max-size", "64", "--widths", "8,1,1",
            "--seed", "7", "--unit", "us", "--csv", "out.csv", "--no-pin", "-q",
        ]))
        .unwrap();

        assert_eq!(opts.config.runs, 5);
        assert_eq!(opts.config.passes, 10);
        assert_eq!(opts.config.max_array_size, 64);
        assert_eq!(opts.config.element_widths, vec![ElementWidth::U8, ElementWidth::U64]);
        assert_eq!(opts.config.seed, 7);
        assert_eq!(opts.config.unit, DurationUnit::Micros);
        assert!(!opts.config.pin_cpu);
        assert_eq!(opts.csv_path.as_deref(), Some("out.csv"));
        assert!(opts.quiet);
        assert!(!opts.show_help);
    }

    #[test]
    fn test_parse_args_rejects() {
        assert!(matches!(parse_args(&args(&["--bogus"])), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse_args(&args(&["--runs"])), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse_args(&args(&["--runs", "x"])), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse_args(&args(&["--runs", "2"])), Err(Error::EvenRunCount(2))));
        assert!(matches!(
            parse_args(&args(&["--widths", "3"])),
            Err(Error::UnknownElementWidth(3))
        ));
        assert!(matches!(parse_args(&args(&["--unit", "h"])), Err(Error::UnknownUnit(_))));
    }

    #[test]
    fn test_help_skips_validation() {
        let opts = parse_args(&args(&["--runs", "2", "--help"])).unwrap();
        assert!(opts.show_help);
    }
}
