//! The failure ledger.
//!
//! Every row that cannot be downloaded is recorded as a [`FailureRecord`].
//! The ledger is written once, at the end of the run, as a CSV file with the
//! same `file_name,download_url` layout as the input so that failed rows can
//! be fed back into a new run.
//!
//! ```rust
//! use rowfetch::ledger::{FailureLedger, FailureReason, FailureRecord};
//!
//! let mut ledger = FailureLedger::new();
//! ledger.append(FailureRecord::new("", "http://x/b", FailureReason::EmptyField));
//!
//! let mut out = Vec::new();
//! ledger.write_to(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "file_name,download_url,reason\n,http://x/b,file_name or download_url is empty\n"
//! );
//! ```

use crate::error::{Error, Result};

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Header record written before any failure.
pub const HEADER: [&str; 3] = ["file_name", "download_url", "reason"];

/// Why a row could not be downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The file name or the URL field is empty.
    EmptyField,
    /// The file name is not valid in the configured charset.
    Decode,
    /// The destination file could not be created.
    Open,
    /// The transfer failed or the server did not answer `200 OK`.
    Transfer,
}

impl FailureReason {
    /// The reason string recorded in the ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::EmptyField => "file_name or download_url is empty",
            FailureReason::Decode => "fail to decode file_name",
            FailureReason::Open => "fail to open file",
            FailureReason::Transfer => "fail to download file",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row that could not be downloaded.
///
/// Fields are kept as bytes: a file name that failed to decode is recorded
/// exactly as it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub file_name: Vec<u8>,
    pub download_url: Vec<u8>,
    pub reason: FailureReason,
}

impl FailureRecord {
    /// Create a record from the fields of the failed row.
    pub fn new(
        file_name: impl Into<Vec<u8>>,
        download_url: impl Into<Vec<u8>>,
        reason: FailureReason,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            download_url: download_url.into(),
            reason,
        }
    }

}

/// Ordered, append-only list of failures, header first.
#[derive(Debug, Clone, Default)]
pub struct FailureLedger {
    records: Vec<FailureRecord>,
}

impl FailureLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more failure.
    pub fn append(&mut self, record: FailureRecord) {
        self.records.push(record);
    }

    /// Recorded failures, in the order they happened. The header is not
    /// part of this slice.
    pub fn records(&self) -> &[FailureRecord] {
        &self.records
    }

    /// Number of failures, header excluded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` if no failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the header and every record as CSV.
    pub fn write_to<W: io::Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(false).from_writer(writer);
        writer.write_record(HEADER)?;
        for record in &self.records {
            writer.write_record([
                record.file_name.as_slice(),
                record.download_url.as_slice(),
                record.reason.as_str().as_bytes(),
            ])?;
        }
        writer.flush()
    }

    /// Write the ledger to its sink. The sink is consumed, so a run
    /// flushes its ledger exactly once.
    pub fn flush_to(&self, sink: LedgerSink) -> Result<()> {
        debug!(
            "Writing {} failure record(s) to {}",
            self.records.len(),
            sink.path.display()
        );
        let LedgerSink { path, file } = sink;
        self.write_to(file)
            .map_err(|source| Error::Ledger { path, source })
    }
}

/// The opened destination of the failure ledger.
///
/// Opening happens before any row is processed so that an unwritable ledger
/// aborts the run up front. The file is appended to, never truncated.
#[derive(Debug)]
pub struct LedgerSink {
    path: PathBuf,
    file: File,
}

impl LedgerSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| Error::Ledger {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, file })
    }

    /// Get a reference to the ledger path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(ledger: &FailureLedger) -> String {
        let mut out = Vec::new();
        ledger.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(
            FailureReason::EmptyField.to_string(),
            "file_name or download_url is empty"
        );
        assert_eq!(FailureReason::Decode.as_str(), "fail to decode file_name");
        assert_eq!(FailureReason::Open.as_str(), "fail to open file");
        assert_eq!(FailureReason::Transfer.as_str(), "fail to download file");
    }

    #[test]
    fn test_empty_ledger_writes_header() {
        let ledger = FailureLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(written(&ledger), "file_name,download_url,reason\n");
    }

    #[test]
    fn test_records_keep_order() {
        let mut ledger = FailureLedger::new();
        ledger.append(FailureRecord::new("a.jpg", "http://x/a", FailureReason::Transfer));
        ledger.append(FailureRecord::new("b, c.jpg", "http://x/b", FailureReason::Open));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[0].reason, FailureReason::Transfer);
        assert_eq!(
            written(&ledger),
            "file_name,download_url,reason\n\
             a.jpg,http://x/a,fail to download file\n\
             \"b, c.jpg\",http://x/b,fail to open file\n"
        );
    }

    #[test]
    fn test_raw_bytes_are_preserved() {
        let mut ledger = FailureLedger::new();
        ledger.append(FailureRecord::new(
            vec![0xD6, 0xD0, 0xFF],
            "http://x/a",
            FailureReason::Decode,
        ));

        let mut out = Vec::new();
        ledger.write_to(&mut out).unwrap();
        let line = out.split(|b| *b == b'\n').nth(1).unwrap();
        assert!(line.starts_with(&[0xD6, 0xD0, 0xFF, b',']));
    }

    #[test]
    fn test_flush_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.csv");
        std::fs::write(&path, "previous\n").unwrap();

        let mut ledger = FailureLedger::new();
        ledger.append(FailureRecord::new("a.jpg", "", FailureReason::EmptyField));
        ledger.flush_to(LedgerSink::open(&path).unwrap()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "previous\nfile_name,download_url,reason\na.jpg,,file_name or download_url is empty\n"
        );
    }

    #[test]
    fn test_open_sink_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("failed.csv");
        let err = LedgerSink::open(&path).unwrap_err();
        assert!(matches!(err, Error::Ledger { .. }));
    }
}
