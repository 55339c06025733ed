//! CLI for the parameter passing evaluation.
//!
//! Usage:
//!   param-pass                         # Full sweep with default settings
//!   param-pass --runs 3 --passes 1000  # Quick sweep
//!   param-pass --csv results.csv       # Also export CSV
//!   param-pass --help                  # Show help

use param_pass_timing::prelude::*;
use param_pass_timing::tui;
use std::env;
use std::io;
use std::process::ExitCode;

fn run(opts: CliOptions) -> Result<u64> {
    let config = opts.config;
    if !opts.quiet {
        tui::print_header(&config);
    }

    let sweep = Sweep::new(config, WallClock::new())?;
    let outcome = if opts.quiet {
        sweep.run()
    } else {
        sweep.run_with(tui::print_progress)
    };

    if !opts.quiet {
        if let Some(core) = outcome.pinned_core {
            eprintln!("Sweep ran pinned to core {}", core);
        }
    }

    let rows = outcome.data.results()?;
    write_report(&mut io::stdout().lock(), &rows)?;

    if let Some(path) = opts.csv_path.as_deref() {
        export_csv(path, &rows, outcome.data.unit())?;
        if !opts.quiet {
            eprintln!("Results written to {}", path);
        }
    }

    Ok(outcome.checksum)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    if opts.show_help {
        tui::print_help();
        return ExitCode::SUCCESS;
    }

    match run(opts) {
        Ok(checksum) => {
            // computed results suppress dead-code elimination of the sweep
            std::hint::black_box(checksum);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
