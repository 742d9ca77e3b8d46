//! Text report of grouped books
//!
//! Layout, per group:
//!
//! ```text
//! <parent name>
//! <display name> <state>, <state>, ...
//! ...
//! <blank line>
//! ```

use crate::error::{Error, Result};
use crate::types::GroupedBooks;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Write the report for `grouped` to `writer`
pub fn write_report<W: Write>(grouped: &GroupedBooks, writer: &mut W) -> std::io::Result<()> {
    for group in grouped {
        writeln!(writer, "{}", group.parent_name())?;
        for book in group.books() {
            writeln!(writer, "{} {}", book.display_name, book.meta.states.join(", "))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Render the report to a string
pub fn render_report(grouped: &GroupedBooks) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report(grouped, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the report to a file, replacing any existing content
///
/// # Errors
/// Returns [`Error::Report`] if the file cannot be created or written. A
/// failure part-way through may leave a truncated file behind.
pub fn save_report(grouped: &GroupedBooks, path: &Path) -> Result<()> {
    debug!(path = %path.display(), groups = grouped.len(), "writing report");

    let report_err = |source: std::io::Error| Error::Report {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(report_err)?;
    let mut writer = BufWriter::new(file);
    write_report(grouped, &mut writer).map_err(report_err)?;
    writer.flush().map_err(report_err)?;

    info!(path = %path.display(), groups = grouped.len(), books = grouped.total_books(), "report saved");
    Ok(())
}
