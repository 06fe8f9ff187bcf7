//! Command-line interface.

use crate::config::Configuration;
use crate::downloader::DownloaderBuilder;
use crate::error::Result;
use crate::pipeline;
use crate::progress::StyleOptions;

use clap::Parser;
use indicatif::MultiProgress;
use reqwest::header::{HeaderValue, USER_AGENT};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Download every file listed in a CSV table.
#[derive(Debug, Parser)]
#[command(name = "rowfetch", version)]
#[command(about = "Bulk-download files named and located by the rows of a CSV table", long_about = None)]
pub struct Cli {
    /// CSV file listing the files to download.
    #[arg(long, alias = "csv_file", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Existing directory where files are written.
    #[arg(long, alias = "download_dir", value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Charset of the file name column: gbk, gb2312 or gb18030. Anything else
    /// keeps names as they are.
    #[arg(long, default_value = Configuration::DEFAULT_CHARSET)]
    pub charset: String,

    /// Number of leading rows to skip (title rows).
    #[arg(long, alias = "start_line_index", default_value_t = 0, value_name = "N")]
    pub start_line_index: usize,

    /// Column holding the file name, starting at 0.
    #[arg(long, alias = "file_name_index", default_value_t = 0, value_name = "N")]
    pub file_name_index: usize,

    /// Column holding the download URL, starting at 0.
    #[arg(long, alias = "download_url_index", default_value_t = 0, value_name = "N")]
    pub download_url_index: usize,

    /// CSV file the failed rows are appended to.
    #[arg(long, alias = "error_log", default_value = Configuration::DEFAULT_FAILURE_LOG, value_name = "PATH")]
    pub error_log: PathBuf,

    /// Give up on a transfer after this many seconds. Waits forever when unset.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Do not draw progress bars.
    #[arg(long)]
    pub no_progress: bool,

    /// Log per-row details.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Turn the arguments into a validated [`Configuration`].
    pub fn configuration(&self) -> Result<Configuration> {
        let mut builder = Configuration::builder()
            .charset(self.charset.clone())
            .start_index(self.start_line_index)
            .file_name_index(self.file_name_index)
            .url_index(self.download_url_index)
            .failure_log(self.error_log.clone())
            .timeout(self.timeout_secs.map(Duration::from_secs));
        if let Some(ref csv) = self.csv {
            builder = builder.input(csv.clone());
        }
        if let Some(ref dir) = self.download_dir {
            builder = builder.directory(dir.clone());
        }
        builder.build()
    }

    /// Run the whole pipeline with these arguments, drawing progress on
    /// `bars`.
    pub async fn run(self, bars: MultiProgress) -> anyhow::Result<()> {
        let config = self.configuration()?;
        info!(
            csv_file = %config.input.display(),
            charset = %config.charset,
            download_dir = %config.directory.display(),
            start_line_index = config.start_index,
            file_name_index = config.file_name_index,
            download_url_index = config.url_index,
            error_log = %config.failure_log.display(),
            "params info"
        );

        let style = if self.no_progress {
            StyleOptions::hidden()
        } else {
            StyleOptions::default()
        };
        let mut builder = DownloaderBuilder::new(config)
            .style_options(style)
            .progress_bars(bars);
        if let Some(ref ua) = self.user_agent {
            builder = builder.header(USER_AGENT, HeaderValue::from_str(ua)?);
        }
        let downloader = builder.build()?;

        pipeline::execute_with(&downloader).await?;
        Ok(())
    }
}
