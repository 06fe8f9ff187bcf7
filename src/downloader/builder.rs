//! Builder for [`Downloader`] instances.

use super::downloader::Downloader;
use crate::config::Configuration;
use crate::error::Result;
use crate::progress::StyleOptions;
use crate::report::Summary;
use crate::transfer::{HttpClientConfig, HttpTransfer, Transfer};

use indicatif::MultiProgress;
use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::sync::Arc;

/// Callback invoked once per row, right after its outcome is known.
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() -> rowfetch::Result<()> {
/// use rowfetch::config::Configuration;
/// use rowfetch::downloader::DownloaderBuilder;
///
/// let config = Configuration::builder().input("in.csv").directory("out").build()?;
/// let d = DownloaderBuilder::hidden(config).build()?;
/// # Ok(())
/// # }
/// ```
pub struct DownloaderBuilder {
    config: Configuration,
    style_options: StyleOptions,
    bars: Option<MultiProgress>,
    headers: Option<HeaderMap>,
    on_complete: Option<Arc<DownloadCallback>>,
}

impl DownloaderBuilder {
    /// Creates a builder with the default progress bars.
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            style_options: StyleOptions::default(),
            bars: None,
            headers: None,
            on_complete: None,
        }
    }

    /// Creates a builder that draws no progress bars.
    pub fn hidden(config: Configuration) -> Self {
        Self::new(config).style_options(StyleOptions::hidden())
    }

    /// Set the progress bar style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.style_options = style_options;
        self
    }

    /// Draw the progress bars on `bars`.
    ///
    /// Pass the handle the log writer suspends (see
    /// [`init_logging`](crate::logging::init_logging)) so that log lines are
    /// printed above the bars instead of through them.
    pub fn progress_bars(mut self, bars: MultiProgress) -> Self {
        self.bars = Some(bars);
        self
    }

    /// Set callback for when each row completes, whatever its outcome.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    fn new_header(&self) -> HeaderMap {
        match self.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add HTTP headers sent with every request. Successive calls are
    /// merged.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.headers = Some(new);
        self
    }

    /// Add one HTTP header sent with every request.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.headers = Some(new);
        self
    }

    /// Create a [`Downloader`] that fetches over HTTP.
    pub fn build(self) -> Result<Downloader<HttpTransfer>> {
        let transfer = HttpTransfer::new(HttpClientConfig {
            timeout: self.config.timeout,
            headers: self.headers.clone(),
        })?;
        Ok(self.build_with(transfer))
    }

    /// Create a [`Downloader`] with a custom transfer primitive. Headers set
    /// on the builder are ignored.
    pub fn build_with<T: Transfer>(self, transfer: T) -> Downloader<T> {
        Downloader::new(
            self.config,
            transfer,
            self.style_options,
            self.bars,
            self.on_complete,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT, USER_AGENT};

    fn config() -> Configuration {
        Configuration::builder()
            .input("in.csv")
            .directory("out")
            .build()
            .unwrap()
    }

    #[test]
    fn test_headers_are_merged() {
        let mut map = HeaderMap::new();
        map.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let builder = DownloaderBuilder::new(config())
            .header(USER_AGENT, HeaderValue::from_static("rowfetch"))
            .headers(map);

        let headers = builder.headers.as_ref().unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(USER_AGENT).unwrap(), "rowfetch");
    }

    #[test]
    fn test_hidden_builder() {
        let builder = DownloaderBuilder::hidden(config());
        assert!(!builder.style_options.is_enabled());
    }

    #[test]
    fn test_progress_bars_are_kept() {
        let builder = DownloaderBuilder::new(config()).progress_bars(MultiProgress::new());
        assert!(builder.bars.is_some());
        assert!(DownloaderBuilder::new(config()).bars.is_none());
    }

    #[test]
    fn test_build_http_downloader() {
        let downloader = DownloaderBuilder::hidden(config()).build().unwrap();
        assert_eq!(downloader.config().directory.to_str(), Some("out"));
    }
}
