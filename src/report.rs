//! Per-row outcomes and the result of a run.
//!
//! Every row of the active window produces exactly one [`Summary`], either
//! [`Status::Downloaded`] or [`Status::Failed`]. A [`Report`] gathers the
//! summaries together with the [`FailureLedger`] built along the way.

use crate::ledger::{FailureLedger, FailureReason};

use std::path::{Path, PathBuf};

/// Outcome of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The file was written to disk.
    Downloaded,
    /// The row was recorded in the failure ledger.
    Failed(FailureReason),
}

/// What happened to one row.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Position of the row in the active window.
    position: usize,
    /// File name as far as it could be resolved, as text. Bytes that are
    /// not valid UTF-8 are replaced; the file on disk keeps them.
    file_name: String,
    /// Download URL.
    url: String,
    /// Destination path, once one was chosen.
    path: Option<PathBuf>,
    /// Bytes written to disk.
    size: u64,
    status: Status,
}

impl Summary {
    /// Summary of a row written to `path`.
    pub fn downloaded(
        position: usize,
        file_name: impl Into<String>,
        url: impl Into<String>,
        path: PathBuf,
        size: u64,
    ) -> Self {
        Self {
            position,
            file_name: file_name.into(),
            url: url.into(),
            path: Some(path),
            size,
            status: Status::Downloaded,
        }
    }

    /// Summary of a row recorded in the failure ledger.
    pub fn failed(
        position: usize,
        file_name: impl Into<String>,
        url: impl Into<String>,
        reason: FailureReason,
    ) -> Self {
        Self {
            position,
            file_name: file_name.into(),
            url: url.into(),
            path: None,
            size: 0,
            status: Status::Failed(reason),
        }
    }

    /// Attach the destination path of a row that failed after its file was
    /// created.
    pub fn with_path(self, path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }

    /// Get the position of the row in the active window.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get a reference to the file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get a reference to the download URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the destination path, if one was chosen.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the number of bytes written.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Return `true` if the file was written to disk.
    pub fn is_downloaded(&self) -> bool {
        self.status == Status::Downloaded
    }
}

/// Result of processing the active window.
#[derive(Debug, Clone, Default)]
pub struct Report {
    summaries: Vec<Summary>,
    ledger: FailureLedger,
}

impl Report {
    /// Create a report from the summaries and the ledger of a run.
    pub fn new(summaries: Vec<Summary>, ledger: FailureLedger) -> Self {
        Self { summaries, ledger }
    }

    /// One summary per row, in row order.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    /// Get a reference to the failure ledger.
    pub fn ledger(&self) -> &FailureLedger {
        &self.ledger
    }

    /// Take the ledger out of the report.
    pub fn into_ledger(self) -> FailureLedger {
        self.ledger
    }

    /// Number of rows written to disk.
    pub fn downloaded(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_downloaded()).count()
    }

    /// Number of rows recorded in the ledger.
    pub fn failed(&self) -> usize {
        self.ledger.len()
    }
}
