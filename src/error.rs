//! Error handling for rowfetch.
//!
//! Only fatal conditions are represented here: a misconfigured run, an
//! unreadable input table or an unusable destination. Per-row problems
//! (empty fields, undecodable names, open and transfer failures) never
//! surface as an [`Error`]; they are recorded in the
//! [`FailureLedger`](crate::ledger::FailureLedger) instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a rowfetch run.
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value was not provided.
    #[error("missing required configuration value: {0}")]
    MissingConfig(&'static str),

    /// The destination directory does not exist or is not a directory.
    #[error("download directory {} does not exist or is not a directory", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The configured start offset lies beyond the end of the input table.
    #[error("start index {start} is beyond the {len} rows of the input table")]
    StartIndexOutOfRange { start: usize, len: usize },

    /// A configured column index does not exist in a row.
    ///
    /// This indicates a misconfigured run rather than a bad row, so the
    /// whole run is aborted.
    #[error("row {row}: column {column} is out of range (row has {len} fields)")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        len: usize,
    },

    /// The input table could not be opened or parsed.
    #[error("cannot read input table {}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The failure ledger could not be opened or written.
    #[error("cannot write failure ledger {}", .path.display())]
    Ledger {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error from the Reqwest library while building the HTTP client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with a rowfetch [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
