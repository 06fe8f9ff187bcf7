//! The download orchestrator.
//!
//! A [`Downloader`] walks the active window of the input table one row at a
//! time: it validates the row, resolves the output file name, creates the
//! file and hands it to a [`Transfer`](crate::transfer::Transfer). Every row
//! ends up either downloaded or recorded in the failure ledger.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rowfetch::config::Configuration;
//! use rowfetch::downloader::DownloaderBuilder;
//! use rowfetch::row::Row;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Configuration::builder()
//!     .input("files.csv")
//!     .directory("downloads")
//!     .url_index(1)
//!     .build()?;
//! let downloader = DownloaderBuilder::new(config)
//!     .on_complete(|summary| println!("{}: {:?}", summary.file_name(), summary.status()))
//!     .build()?;
//!
//! let rows: Vec<Row> = vec![["a.jpg", "https://example.com/a.jpg"].into_iter().collect()];
//! let report = downloader.run(&rows).await?;
//! println!("{} downloaded, {} failed", report.downloaded(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod downloader;

pub use builder::{DownloadCallback, DownloaderBuilder};
pub use downloader::Downloader;
