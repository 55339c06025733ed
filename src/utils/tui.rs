//! Text User Interface (TUI) utilities.
//!
//! Handles console output for the CLI. Everything here goes to stderr; stdout
//! is reserved for the report.

use crate::config::SweepConfig;
use crate::sweep::Progress;
use crate::utils::cpu_affinity::online_cpus;
use terminal_size::{terminal_size_of, Width};

/// Get the stderr terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size_of(std::io::stderr()) {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Header box describing the sweep about to run
pub fn print_header(config: &SweepConfig) {
    let widths = config
        .element_widths
        .iter()
        .map(|w| w.size_bytes().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let sizes = config.array_sizes().count();
    let largest = config.array_sizes().last().unwrap_or(0);

    let lines = [
        "Parameter passing evaluation".to_string(),
        format!("Runs: {} (median reported)  Passes: {}", config.runs, config.passes),
        format!("Array sizes: {} (1 .. {})  sizeof(T): {}", sizes, largest, widths),
        format!(
            "Seed: {}  Unit: {}  Pinning: {}  Cores: {}",
            config.seed,
            config.unit,
            if config.pin_cpu { "on" } else { "off" },
            online_cpus()
        ),
    ];

    let max_content_width = get_term_width().saturating_sub(4);
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(40)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    eprintln!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        eprintln!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
        if i == 0 {
            eprintln!("├{}┤", border);
        }
    }
    eprintln!("└{}┘", border);
    eprintln!();
    eprintln!("Running timing evaluation");
}

/// One progress line per sweep event
pub fn print_progress(progress: Progress) {
    match progress {
        Progress::Run { run, runs } => eprintln!("Run # {} of {}", run, runs),
        Progress::Step {
            width, array_size, ..
        } => eprintln!("timing arr size={} sizeof(T)={}", array_size, width.size_bytes()),
    }
}

/// Print the usage text
pub fn print_help() {
    println!("param-pass - time passing fixed-size arrays by value vs by reference");
    println!();
    println!("Usage:");
    println!("  param-pass [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --runs N        Sweep repetitions, odd (default: {})", crate::config::DEFAULT_RUNS);
    println!("  --passes N      Calls per timed phase (default: {})", crate::config::DEFAULT_PASSES);
    println!(
        "  --max-size N    Power of two; sizes 1 .. N/2 are timed (default: {})",
        crate::config::DEFAULT_MAX_ARRAY_SIZE
    );
    println!("  --widths LIST   Element sizes in bytes, e.g. 1,2,4,8 (default: all)");
    println!("  --seed N        Faux random seed (default: {})", crate::random::DEFAULT_SEED);
    println!("  --unit UNIT     ns, us, ms or s (default: ms)");
    println!("  --csv PATH      Also write the results as CSV");
    println!("  --no-pin        Don't pin the sweep to one core");
    println!("  -q, --quiet     No progress output");
    println!("  -h, --help      Show this help");
    println!();
    println!("The report is written to stdout. Time is median(mode) - median(baseline),");
    println!("so it may be negative.");
}
