//! Report rendering and CSV export.

use crate::passing::PassMode;
use crate::utils::timer::DurationUnit;
use std::io::{self, Write};
use std::path::Path;

/// Header line of the console report.
pub const REPORT_HEADER: &str = "Param Pass Type, Array Size, sizeof(T), Time";

/// Header line of the CSV export.
pub const CSV_HEADER: &str = "mode,array_size,elem_size,delta,unit";

/// One output row: median(mode) - median(baseline) for a (size, width) key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultRow {
    pub mode: PassMode,
    /// Array length in elements
    pub array_size: usize,
    /// `sizeof(T)` in bytes
    pub elem_size: usize,
    /// May be negative; never clamped.
    pub delta: i64,
}

/// Write the report: a blank line, the header, then one line per row.
pub fn write_report<W: Write>(out: &mut W, rows: &[ResultRow]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", REPORT_HEADER)?;
    for row in rows {
        writeln!(
            out,
            "{}, {}, {}, {}",
            row.mode.label(),
            row.array_size,
            row.elem_size,
            row.delta
        )?;
    }
    out.flush()
}

/// Export rows to a CSV file
pub fn export_csv<P: AsRef<Path>>(path: P, rows: &[ResultRow], unit: DurationUnit) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut out = io::BufWriter::new(file);

    writeln!(out, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{}",
            row.mode.key(),
            row.array_size,
            row.elem_size,
            row.delta,
            unit.suffix()
        )?;
    }
    out.flush()
}
