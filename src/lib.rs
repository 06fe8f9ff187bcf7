//! rowfetch downloads, one after the other, the files listed in a CSV table
//! where each row gives a file name and a download URL.
//!
//! File names may be stored in a legacy Chinese charset (GBK, GB2312,
//! GB18030). Existing files are never overwritten: a colliding name gets a
//! millisecond timestamp appended to its base name. Rows that cannot be
//! downloaded are appended, with a reason, to a failure ledger CSV that can
//! be fed back into a later run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rowfetch::{config::Configuration, pipeline, Error};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! let config = Configuration::builder()
//!     .input("files.csv")
//!     .directory("downloads")
//!     .charset("gbk")
//!     .start_index(1)
//!     .file_name_index(0)
//!     .url_index(1)
//!     .build()?;
//! let report = pipeline::execute(config).await?;
//! println!("{} downloaded, {} failed", report.downloaded(), report.failed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`charset`] - charset selection and file name decoding
//! - [`naming`] - output file name resolution and collision avoidance
//! - [`row`] - input rows, row validation and the active window
//! - [`downloader`] - the `Downloader` orchestrating a run over the rows
//! - [`transfer`] - the transfer primitive and its HTTP implementation
//! - [`ledger`] - the failure ledger
//! - [`report`] - per-row outcomes
//! - [`input`] - reading the input table
//! - [`pipeline`] - a complete run, from input table to flushed ledger
//! - [`config`], [`cli`], [`logging`] - configuration and process setup
//! - [`progress`] - progress bars
//! - [`error`] - fatal errors

pub mod charset;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod input;
pub mod ledger;
pub mod logging;
pub mod naming;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod row;
pub mod transfer;

pub use charset::{Charset, DecodeError};
pub use config::{Configuration, ConfigurationBuilder};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use ledger::{FailureLedger, FailureReason, FailureRecord, LedgerSink};
pub use report::{Report, Status, Summary};
pub use row::Row;
pub use transfer::{HttpClientConfig, HttpTransfer, Transfer, TransferError};
