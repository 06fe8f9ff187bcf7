//! A complete run, from the input table to the flushed failure ledger.
//!
//! The run goes through `INIT -> LOADING_ROWS -> PROCESSING -> FLUSHING ->
//! DONE`. A fatal error in any stage returns immediately: nothing is written
//! to the ledger file in that case.

use crate::config::Configuration;
use crate::downloader::{Downloader, DownloaderBuilder};
use crate::error::Result;
use crate::input::read_rows;
use crate::ledger::LedgerSink;
use crate::report::Report;
use crate::transfer::Transfer;

use tracing::{debug, info};

/// Run with an HTTP downloader and default progress bars.
pub async fn execute(config: Configuration) -> Result<Report> {
    let downloader = DownloaderBuilder::new(config).build()?;
    execute_with(&downloader).await
}

/// Run with a prebuilt downloader.
pub async fn execute_with<T: Transfer>(downloader: &Downloader<T>) -> Result<Report> {
    let config = downloader.config();

    debug!("INIT: checking {}", config.directory.display());
    config.validate_directory()?;
    let sink = LedgerSink::open(&config.failure_log)?;

    debug!("LOADING_ROWS: reading {}", config.input.display());
    let rows = read_rows(&config.input)?;

    debug!("PROCESSING: {} rows", rows.len());
    let report = downloader.run(&rows).await?;

    debug!("FLUSHING: {}", sink.path().display());
    report.ledger().flush_to(sink)?;

    info!(
        "done: {} downloaded, {} failed, failures recorded in {}",
        report.downloaded(),
        report.failed(),
        config.failure_log.display()
    );
    Ok(report)
}
