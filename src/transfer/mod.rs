//! The transfer primitive.
//!
//! The orchestrator only needs one thing from the network: fetch a URL and
//! stream its body into an already opened file, reporting whether the whole
//! exchange succeeded. That contract is the [`Transfer`] trait; the
//! production implementation is [`HttpTransfer`].
//!
//! # Overview
//!
//! - [`client`] - HTTP client creation with tracing middleware
//! - [`fetch`] - the [`Transfer`] trait and its HTTP implementation
//!
//! # Examples
//!
//! ```rust,no_run
//! use rowfetch::transfer::{HttpClientConfig, HttpTransfer, Transfer};
//! use indicatif::ProgressBar;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transfer = HttpTransfer::new(HttpClientConfig {
//!     timeout: Some(Duration::from_secs(30)),
//!     headers: None,
//! })?;
//!
//! let mut file = tokio::fs::File::create("a.jpg").await?;
//! let written = transfer
//!     .fetch("https://example.com/a.jpg", &mut file, &ProgressBar::hidden())
//!     .await?;
//! println!("{} bytes", written);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod fetch;

pub use client::{create_http_client, HttpClientConfig};
pub use fetch::{HttpTransfer, Transfer, TransferError};
