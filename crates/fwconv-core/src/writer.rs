//! CSV output.

use std::io::{self, Write};
use std::path::Path;

use fwconv_model::OutputTable;
use tempfile::NamedTempFile;

use crate::error::{ProcessError, Result};

/// A table without columns is written as zero bytes.
fn write_table<W: Write>(table: &OutputTable, sink: W) -> csv::Result<W> {
    if table.columns().is_empty() {
        return Ok(sink);
    }
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(table.columns())?;
    for record in table.records() {
        writer.write_record(record.values())?;
    }
    writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// Renders a table as CSV text: header row, then one row per record.
pub fn table_to_csv(table: &OutputTable) -> csv::Result<String> {
    let bytes = write_table(table, Vec::new())?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Writes a table as CSV at `path`.
///
/// Rows go to a temporary file in the destination directory, which is then
/// renamed over `path`; a failed write leaves no partial output behind.
pub fn write_csv(table: &OutputTable, path: &Path) -> Result<()> {
    let output_error = |source: io::Error| ProcessError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(directory).map_err(output_error)?;
    let mut temp = write_table(table, temp).map_err(|e| output_error(e.into()))?;
    temp.flush().map_err(output_error)?;
    temp.persist(path).map_err(|e| output_error(e.error))?;

    tracing::debug!(path = %path.display(), rows = table.len(), "csv written");
    Ok(())
}
