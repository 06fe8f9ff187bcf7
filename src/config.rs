//! Run configuration.
//!
//! A [`Configuration`] is built once at startup, validated, and then only
//! read. It is created through [`ConfigurationBuilder`]:
//!
//! ```rust
//! use rowfetch::config::Configuration;
//!
//! # fn example() -> rowfetch::Result<()> {
//! let config = Configuration::builder()
//!     .input("files.csv")
//!     .directory("downloads")
//!     .charset("GBK")
//!     .start_index(1)
//!     .file_name_index(0)
//!     .url_index(2)
//!     .build()?;
//!
//! assert_eq!(config.failure_log.to_str(), Some("./failed.csv"));
//! # Ok(())
//! # }
//! ```

use crate::charset::Charset;
use crate::error::{Error, Result};

use std::path::PathBuf;
use std::time::Duration;

/// Resolved options of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// CSV file listing the files to download.
    pub input: PathBuf,
    /// Directory where to store the downloaded files. Must already exist.
    pub directory: PathBuf,
    /// Charset of the file name column, as configured.
    pub charset: String,
    /// Number of leading rows to skip.
    pub start_index: usize,
    /// Column holding the file name.
    pub file_name_index: usize,
    /// Column holding the download URL.
    pub url_index: usize,
    /// Where the failure ledger is appended.
    pub failure_log: PathBuf,
    /// Optional bound on each transfer.
    pub timeout: Option<Duration>,
}

impl Configuration {
    pub const DEFAULT_CHARSET: &'static str = "UTF-8";
    pub const DEFAULT_FAILURE_LOG: &'static str = "./failed.csv";

    /// Start building a [`Configuration`].
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    /// The decoding applied to file names.
    pub fn resolved_charset(&self) -> Charset {
        Charset::resolve(&self.charset)
    }

    /// Check that the destination directory exists.
    pub fn validate_directory(&self) -> Result<()> {
        if self.directory.is_dir() {
            Ok(())
        } else {
            Err(Error::DirectoryNotFound(self.directory.clone()))
        }
    }
}

/// Builder for [`Configuration`].
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    input: Option<PathBuf>,
    directory: Option<PathBuf>,
    charset: String,
    start_index: usize,
    file_name_index: usize,
    url_index: usize,
    failure_log: PathBuf,
    timeout: Option<Duration>,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self {
            input: None,
            directory: None,
            charset: Configuration::DEFAULT_CHARSET.into(),
            start_index: 0,
            file_name_index: 0,
            url_index: 0,
            failure_log: PathBuf::from(Configuration::DEFAULT_FAILURE_LOG),
            timeout: None,
        }
    }
}

impl ConfigurationBuilder {
    /// Create a builder with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CSV file to read. Required.
    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set the destination directory. Required.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Set the charset of the file name column (`gbk`, `gb2312`, `gb18030`;
    /// anything else means no decoding).
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Set the number of leading rows to skip.
    pub fn start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Set the column holding the file name.
    pub fn file_name_index(mut self, index: usize) -> Self {
        self.file_name_index = index;
        self
    }

    /// Set the column holding the download URL.
    pub fn url_index(mut self, index: usize) -> Self {
        self.url_index = index;
        self
    }

    /// Set the file the failure ledger is appended to.
    pub fn failure_log(mut self, failure_log: impl Into<PathBuf>) -> Self {
        self.failure_log = failure_log.into();
        self
    }

    /// Bound every transfer. Without it a hung server blocks the run.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create the [`Configuration`], failing if a required path is missing.
    pub fn build(self) -> Result<Configuration> {
        let input = self
            .input
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(Error::MissingConfig("csv file"))?;
        let directory = self
            .directory
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(Error::MissingConfig("download directory"))?;

        Ok(Configuration {
            input,
            directory,
            charset: self.charset,
            start_index: self.start_index,
            file_name_index: self.file_name_index,
            url_index: self.url_index,
            failure_log: self.failure_log,
            timeout: self.timeout,
        })
    }
}
