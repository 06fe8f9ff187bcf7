//! Fetching a URL into an open file.

use super::client::{create_http_client, HttpClientConfig};

use futures::stream::StreamExt;
use indicatif::ProgressBar;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Why a transfer did not complete.
///
/// All variants are reported the same way in the failure ledger; the
/// distinction only shows up in the logs.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The request could not be sent or no response was received.
    #[error("request failed")]
    Request(#[source] reqwest_middleware::Error),

    /// The server answered with something other than `200 OK`.
    #[error("status code is {0}, expected 200 OK")]
    Status(StatusCode),

    /// The response body was interrupted.
    #[error("cannot read response body")]
    Body(#[source] reqwest::Error),

    /// The body could not be written to the destination.
    #[error("cannot write to destination")]
    Write(#[source] io::Error),
}

/// Streams the content of a URL into a sink.
#[allow(async_fn_in_trait)]
pub trait Transfer {
    /// Fetch `url` and copy its body into `sink`, advancing `progress` by the
    /// number of bytes received.
    ///
    /// Succeeds only when the server answered `200 OK` and the whole body was
    /// written and flushed. Returns the number of bytes written. On failure
    /// whatever was already written stays in the sink.
    async fn fetch<W>(
        &self,
        url: &str,
        sink: &mut W,
        progress: &ProgressBar,
    ) -> Result<u64, TransferError>
    where
        W: AsyncWrite + Unpin;
}

/// [`Transfer`] over HTTP(S) with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    client: ClientWithMiddleware,
}

impl HttpTransfer {
    pub fn new(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(create_http_client(config)?))
    }

    pub fn with_client(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

impl Transfer for HttpTransfer {
    async fn fetch<W>(
        &self,
        url: &str,
        sink: &mut W,
        progress: &ProgressBar,
    ) -> Result<u64, TransferError>
    where
        W: AsyncWrite + Unpin,
    {
        debug!("Fetching {}", url);
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TransferError::Request)?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(TransferError::Status(status));
        }

        if let Some(len) = res.content_length() {
            progress.set_length(len);
        }

        let mut written: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = item.map_err(TransferError::Body)?;
            let chunk_size = chunk.len() as u64;
            sink.write_all_buf(&mut chunk)
                .await
                .map_err(TransferError::Write)?;
            written += chunk_size;
            progress.inc(chunk_size);
        }
        sink.flush().await.map_err(TransferError::Write)?;

        debug!("Retrieved {} bytes from {}", written, url);
        Ok(written)
    }
}
