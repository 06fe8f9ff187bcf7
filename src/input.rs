//! Reading the input table.

use crate::error::{Error, Result};
use crate::row::Row;

use std::io;
use std::path::Path;
use tracing::debug;

/// Read every row of a CSV file.
///
/// No header handling is done here: leading rows are skipped later through
/// the configured start index. Rows may have different field counts.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| Error::Input {
            path: path.to_path_buf(),
            source,
        })?;
    let rows = collect_rows(reader).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read every row from an arbitrary reader.
pub fn read_rows_from<R: io::Read>(reader: R) -> std::result::Result<Vec<Row>, csv::Error> {
    collect_rows(
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader),
    )
}

fn collect_rows<R: io::Read>(mut reader: csv::Reader<R>) -> std::result::Result<Vec<Row>, csv::Error> {
    reader
        .byte_records()
        .map(|record| record.map(Row::from))
        .collect()
}
