//! Tests for the sweep driver, using a scripted stopwatch

use super::*;
use crate::error::Error;
use crate::passing::PassMode;
use crate::report::{write_report, ResultRow};
use crate::utils::timer::fake::ScriptedStopwatch;
use crate::utils::timer::WallClock;

fn tiny_config(runs: usize, widths: &[ElementWidth], max_array_size: usize) -> SweepConfig {
    SweepConfig {
        runs,
        passes: 1,
        max_array_size,
        element_widths: widths.to_vec(),
        pin_cpu: false,
        ..SweepConfig::default()
    }
}

fn render(rows: &[ResultRow]) -> String {
    let mut out = Vec::new();
    write_report(&mut out, rows).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_three_runs_single_cell() {
    let config = tiny_config(3, &[ElementWidth::U8], 2);
    // (baseline, by ref, by val) per run
    let sw = ScriptedStopwatch::from_millis([10, 20, 30, 12, 25, 31, 11, 21, 40]);

    let outcome = Sweep::new(config, sw).unwrap().run();
    let rows = outcome.data.results().unwrap();

    // medians: baseline 11, by ref 21, by val 31
    assert_eq!(
        rows,
        vec![
            ResultRow {
                mode: PassMode::ByRef,
                array_size: 1,
                elem_size: 1,
                delta: 10,
            },
            ResultRow {
                mode: PassMode::ByVal,
                array_size: 1,
                elem_size: 1,
                delta: 20,
            },
        ]
    );
    assert_eq!(
        render(&rows),
        "\nParam Pass Type, Array Size, sizeof(T), Time\nby ref, 1, 1, 10\nby val, 1, 1, 20\n"
    );
}

#[test]
fn test_negative_delta_reported() {
    let config = tiny_config(1, &[ElementWidth::U16], 2);
    let sw = ScriptedStopwatch::from_millis([50, 40, 55]);

    let rows = Sweep::new(config, sw).unwrap().run().data.results().unwrap();
    assert_eq!(rows[0].delta, -10);
    assert_eq!(rows[1].delta, 5);
}

#[test]
fn test_samples_truncated_to_unit() {
    let mut config = tiny_config(1, &[ElementWidth::U8], 2);
    config.unit = DurationUnit::Millis;
    let sw = ScriptedStopwatch::new([
        Duration::from_micros(1_999),
        Duration::from_micros(3_001),
        Duration::from_micros(999),
    ]);

    let outcome = Sweep::new(config, sw).unwrap().run();
    let times = outcome.data.get_times(ElementWidth::U8, 1, 0).unwrap();
    assert_eq!(
        times,
        PhaseTimes {
            baseline: 1,
            by_ref: 3,
            by_val: 0,
        }
    );
}

#[test]
fn test_three_phases_per_cell() {
    let widths = [ElementWidth::U8, ElementWidth::U32];
    let config = tiny_config(3, &widths, 8);
    let cells = 3 * widths.len() * 3;
    let sw = ScriptedStopwatch::new(vec![Duration::ZERO; cells * 3]);

    let mut steps = Vec::new();
    let mut runs_seen = Vec::new();
    let outcome = Sweep::new(config, sw).unwrap().run_with(|p| match p {
        Progress::Run { run, runs } => runs_seen.push((run, runs)),
        Progress::Step {
            run,
            width,
            array_size,
        } => steps.push((run, width, array_size)),
    });

    assert!(outcome.data.is_complete());
    assert_eq!(runs_seen, vec![(0, 3), (1, 3), (2, 3)]);
    assert_eq!(steps.len(), cells);
    assert_eq!(
        &steps[..6],
        &[
            (0, ElementWidth::U8, 1),
            (0, ElementWidth::U8, 2),
            (0, ElementWidth::U8, 4),
            (0, ElementWidth::U32, 1),
            (0, ElementWidth::U32, 2),
            (0, ElementWidth::U32, 4),
        ]
    );
    assert_eq!(outcome.data.results().unwrap().len(), 2 * widths.len() * 3);
}

#[test]
fn test_same_seed_same_report() {
    let run_once = || {
        let config = SweepConfig {
            passes: 50,
            ..tiny_config(3, &ElementWidth::ALL, 16)
        };
        let cells = 3 * 4 * 4;
        let script: Vec<u64> = (0..cells as u64 * 3).map(|i| (i * 7919) % 101).collect();
        let outcome = Sweep::new(config, ScriptedStopwatch::from_millis(script))
            .unwrap()
            .run();
        (render(&outcome.data.results().unwrap()), outcome.checksum)
    };

    let (first_report, first_sum) = run_once();
    let (second_report, second_sum) = run_once();
    assert_eq!(first_report, second_report);
    assert_eq!(first_sum, second_sum);
}

#[test]
fn test_seed_changes_checksum() {
    let checksum = |seed| {
        let config = SweepConfig {
            passes: 100,
            seed,
            ..tiny_config(1, &[ElementWidth::U32], 64)
        };
        Sweep::new(config, WallClock::new()).unwrap().run().checksum
    };
    assert_eq!(checksum(42), checksum(42));
    assert_ne!(checksum(42), checksum(43));
}

#[test]
fn test_invalid_config_rejected() {
    let config = tiny_config(2, &[ElementWidth::U8], 2);
    assert!(matches!(
        Sweep::new(config, WallClock::new()),
        Err(Error::EvenRunCount(2))
    ));
}

#[test]
fn test_largest_sizes_with_wall_clock() {
    // u64 x 16384 is 128 KiB per copy; give the sweep room like a main thread
    let handle = std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(|| {
            let config = SweepConfig {
                unit: DurationUnit::Nanos,
                ..tiny_config(1, &ElementWidth::ALL, crate::config::MAX_SUPPORTED_ARRAY_SIZE)
            };
            let outcome = Sweep::new(config, WallClock::new()).unwrap().run();
            outcome.data.results().unwrap()
        })
        .unwrap();

    let rows = handle.join().unwrap();
    assert_eq!(rows.len(), 2 * 4 * 15);
    assert_eq!(rows.first().map(|r| (r.array_size, r.elem_size)), Some((1, 1)));
    assert_eq!(rows.last().map(|r| (r.array_size, r.elem_size)), Some((16384, 8)));
}
