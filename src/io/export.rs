//! CSV export of the sizing result table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::table_rows;
use crate::sizing::SizingResult;

/// Column header for the exported table.
const HEADER: [&str; 3] = ["item", "value", "notes"];

/// Exports the result table to a CSV file at the given path.
///
/// # Arguments
///
/// * `result` - Completed sizing run
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(result: &SizingResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(result, buf)
}

/// Writes the result table as CSV to any writer.
///
/// One header row, then one row per table line. Output is identical for
/// identical inputs.
///
/// # Arguments
///
/// * `result` - Completed sizing run
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(result: &SizingResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;
    for row in table_rows(result) {
        wtr.write_record([&row.item, &row.value, &row.notes])?;
    }
    wtr.flush()?;
    Ok(())
}
