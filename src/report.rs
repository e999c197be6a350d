//! Plain-text duplicate report.
//!
//! The report goes to stdout and contains nothing but the duplicate groups
//! and a closing `Done.`, so it can be parsed by other tools. Diagnostics
//! belong on stderr.

use std::io::{self, Write};

use crate::duplicates::GroupTable;

/// Write every duplicate group, in completion order, followed by `Done.`.
///
/// ```text
/// Duplicate files found for <size>:<hash>:
///   <path1>
///   <path2>
///
/// Done.
/// ```
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_report<W: Write>(out: &mut W, table: &GroupTable) -> io::Result<()> {
    for (key, files) in table.duplicate_groups() {
        writeln!(out, "Duplicate files found for {key}:")?;
        for file in files {
            writeln!(out, "  {}", file.path.display())?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Done.")?;
    out.flush()
}
