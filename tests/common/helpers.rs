use indicatif::ProgressBar;
use reqwest::StatusCode;
use rowfetch::config::{Configuration, ConfigurationBuilder};
use rowfetch::row::Row;
use rowfetch::transfer::{Transfer, TransferError};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a file with the given content
pub fn create_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write file");
    file_path
}

/// Builds rows from string fields
pub fn rows(data: &[&[&str]]) -> Vec<Row> {
    data.iter().map(|fields| fields.iter().collect()).collect()
}

/// Configuration writing into `dir`, file name in column 0 and URL in column 1
pub fn config_builder(dir: &Path) -> ConfigurationBuilder {
    Configuration::builder()
        .input(dir.join("input.csv"))
        .directory(dir)
        .file_name_index(0)
        .url_index(1)
        .failure_log(dir.join("failed.csv"))
}

/// Sorted names of the entries of a directory
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Whether `name` is `<base>_<digits><ext>`
pub fn is_timestamped(name: &str, base: &str, ext: &str) -> bool {
    name.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(ext))
        .is_some_and(|stamp| !stamp.is_empty() && stamp.bytes().all(|b| b.is_ascii_digit()))
}

/// Asserts that a file has the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).unwrap_or_else(|e| panic!("cannot read {:?}: {}", path, e));
    assert_eq!(content, expected, "content mismatch at path: {:?}", path);
}

/// Canned answer of the fake transfer for one URL
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Body(Vec<u8>),
    Status(StatusCode),
    /// Writes the bytes then fails.
    Interrupted(Vec<u8>),
}

/// In-memory [`Transfer`] recording every URL it is asked for
#[derive(Debug, Default)]
pub struct FakeTransfer {
    responses: HashMap<String, FakeResponse>,
    requested: Mutex<Vec<String>>,
}

impl FakeTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, response: FakeResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn ok(self, url: &str, body: &[u8]) -> Self {
        self.with(url, FakeResponse::Body(body.to_vec()))
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Transfer for FakeTransfer {
    async fn fetch<W>(
        &self,
        url: &str,
        sink: &mut W,
        progress: &ProgressBar,
    ) -> Result<u64, TransferError>
    where
        W: AsyncWrite + Unpin,
    {
        self.requested.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(FakeResponse::Body(body)) => {
                sink.write_all(body).await.map_err(TransferError::Write)?;
                sink.flush().await.map_err(TransferError::Write)?;
                progress.inc(body.len() as u64);
                Ok(body.len() as u64)
            }
            Some(FakeResponse::Status(status)) => Err(TransferError::Status(*status)),
            Some(FakeResponse::Interrupted(partial)) => {
                sink.write_all(partial).await.map_err(TransferError::Write)?;
                sink.flush().await.map_err(TransferError::Write)?;
                Err(TransferError::Write(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset",
                )))
            }
            None => Err(TransferError::Status(StatusCode::NOT_FOUND)),
        }
    }
}
