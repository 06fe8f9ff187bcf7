//! Core downloader implementation.

use super::builder::DownloadCallback;
use crate::charset::Charset;
use crate::config::Configuration;
use crate::error::Result;
use crate::ledger::{FailureLedger, FailureReason, FailureRecord};
use crate::naming::{destination_path, resolve_file_name};
use crate::progress::{ProgressDisplay, StyleOptions};
use crate::report::{Report, Status, Summary};
use crate::row::{active_window, classify, Classification, Row};
use crate::transfer::{HttpTransfer, Transfer};

use indicatif::MultiProgress;
use std::fmt;
use std::sync::Arc;
use tokio::fs::OpenOptions;
use tracing::{debug, info, warn};

/// Represents the download controller.
///
/// Rows are handled strictly in order, one at a time; the next row starts
/// only once the previous one is downloaded or recorded as failed.
pub struct Downloader<T = HttpTransfer> {
    config: Configuration,
    /// Resolved once from the configured charset name.
    charset: Charset,
    transfer: T,
    style_options: StyleOptions,
    bars: Option<MultiProgress>,
    on_complete: Option<Arc<DownloadCallback>>,
}

impl<T> fmt::Debug for Downloader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .field("charset", &self.charset)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl<T: Transfer> Downloader<T> {
    pub(crate) fn new(
        config: Configuration,
        transfer: T,
        style_options: StyleOptions,
        bars: Option<MultiProgress>,
        on_complete: Option<Arc<DownloadCallback>>,
    ) -> Self {
        let charset = config.resolved_charset();
        Self {
            config,
            charset,
            transfer,
            style_options,
            bars,
            on_complete,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Get the charset file names are decoded with.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Get a reference to the transfer primitive.
    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    /// Process the active window of `rows`.
    ///
    /// Returns one summary per row of the window and the failure ledger.
    /// Only configuration errors (start index or column index out of range)
    /// abort the run.
    pub async fn run(&self, rows: &[Row]) -> Result<Report> {
        let window = active_window(rows, self.config.start_index)?;
        let total = window.len();
        info!("reader handle files: {}", total);

        let progress =
            ProgressDisplay::new(self.style_options.clone(), total, self.bars.clone());
        let mut ledger = FailureLedger::new();
        let mut summaries = Vec::with_capacity(total);

        for (position, row) in window.iter().enumerate() {
            let summary = self.process_row(position, row, &progress, &mut ledger).await?;
            progress.increment_main();

            match summary.status() {
                Status::Downloaded => info!(
                    "download success: {} handled: {} of {}",
                    summary.file_name(),
                    position + 1,
                    total
                ),
                Status::Failed(reason) => warn!(
                    "{}: {} ({}) handled: {} of {}",
                    reason,
                    summary.file_name(),
                    summary.url(),
                    position + 1,
                    total
                ),
            }

            if let Some(ref callback) = self.on_complete {
                callback(&summary);
            }
            summaries.push(summary);
        }

        progress.finish();
        debug!(
            "Processed {} rows, {} failed",
            summaries.len(),
            ledger.len()
        );
        Ok(Report::new(summaries, ledger))
    }

    async fn process_row(
        &self,
        position: usize,
        row: &Row,
        progress: &ProgressDisplay,
        ledger: &mut FailureLedger,
    ) -> Result<Summary> {
        let classification = classify(
            row,
            self.config.start_index + position,
            self.config.file_name_index,
            self.config.url_index,
        )?;
        let (raw_name, raw_url) = match classification {
            Classification::Ready { file_name, url } => (file_name, url),
            Classification::Rejected {
                file_name,
                url,
                reason,
            } => return Ok(record_failure(ledger, position, file_name, url, reason)),
        };

        let directory = &self.config.directory;
        let file_name = match resolve_file_name(raw_name, self.charset, |name| {
            destination_path(directory, name).is_some_and(|path| path.exists())
        }) {
            Ok(name) => name,
            Err(e) => {
                debug!("{}", e);
                return Ok(record_failure(
                    ledger,
                    position,
                    raw_name,
                    raw_url,
                    FailureReason::Decode,
                ));
            }
        };
        let display_name = String::from_utf8_lossy(&file_name).into_owned();
        let url = String::from_utf8_lossy(raw_url).into_owned();
        debug!("start download: {}", display_name);

        let Some(path) = destination_path(directory, &file_name) else {
            debug!(
                "{} does not name a file inside {}",
                display_name,
                directory.display()
            );
            return Ok(record_failure(
                ledger,
                position,
                &file_name,
                raw_url,
                FailureReason::Open,
            ));
        };

        // Never reuse an existing file, even one created since the name was chosen.
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) => {
                warn!("fail to open file: {}: {}", path.display(), e);
                return Ok(record_failure(
                    ledger,
                    position,
                    &file_name,
                    raw_url,
                    FailureReason::Open,
                ));
            }
        };

        let pb = progress.create_child_progress(&display_name);
        let fetched = self.transfer.fetch(&url, &mut file, &pb).await;
        progress.finish_child(pb);
        drop(file);

        match fetched {
            Ok(size) => Ok(Summary::downloaded(position, display_name, url, path, size)),
            Err(e) => {
                warn!("fail to download file: {}: {:?}", url, e);
                Ok(record_failure(
                    ledger,
                    position,
                    &file_name,
                    raw_url,
                    FailureReason::Transfer,
                )
                .with_path(path))
            }
        }
    }
}

fn record_failure(
    ledger: &mut FailureLedger,
    position: usize,
    file_name: &[u8],
    url: &[u8],
    reason: FailureReason,
) -> Summary {
    ledger.append(FailureRecord::new(file_name, url, reason));
    Summary::failed(
        position,
        String::from_utf8_lossy(file_name),
        String::from_utf8_lossy(url),
        reason,
    )
}
