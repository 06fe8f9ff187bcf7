//! Logging init: structured events on stderr, printed above the progress bars.

use indicatif::MultiProgress;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` for this crate
/// when `verbose` is true. Events are written while `bars` is suspended, so
/// the same handle must be given to
/// [`DownloaderBuilder::progress_bars`](crate::downloader::DownloaderBuilder::progress_bars).
/// Calling it twice is harmless.
pub fn init_logging(verbose: bool, bars: &MultiProgress) {
    let default_filter = if verbose {
        "info,rowfetch=debug"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(SuspendingMakeWriter::new(bars.clone(), io::stderr))
        .with_target(false)
        .try_init();
}

/// Hands out writers that print above a set of progress bars.
#[derive(Debug)]
pub struct SuspendingMakeWriter<M> {
    bars: MultiProgress,
    inner: M,
}

impl<M> SuspendingMakeWriter<M> {
    pub fn new(bars: MultiProgress, inner: M) -> Self {
        Self { bars, inner }
    }
}

impl<'a, M> MakeWriter<'a> for SuspendingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SuspendingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter {
            bars: self.bars.clone(),
            inner: self.inner.make_writer(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one event and writes it out with the bars cleared.
pub struct SuspendingWriter<W: Write> {
    bars: MultiProgress,
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let Self { bars, inner, buf } = self;
        let written = bars.suspend(|| {
            inner.write_all(buf)?;
            inner.flush()
        });
        buf.clear();
        written
    }
}

impl<W: Write> Drop for SuspendingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::{ProgressBar, ProgressDrawTarget};
    use std::sync::Mutex;

    #[test]
    fn test_event_is_written_on_drop() {
        let bars = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let bar = bars.add(ProgressBar::new(10));
        bar.inc(1);
        let make_writer = SuspendingMakeWriter::new(bars, Mutex::new(Vec::new()));

        {
            let mut writer = make_writer.make_writer();
            writer.write_all(b"download success: ").unwrap();
            writer.write_all(b"a.jpg\n").unwrap();
        }

        assert_eq!(
            make_writer.inner.lock().unwrap().as_slice(),
            b"download success: a.jpg\n"
        );
    }

    #[test]
    fn test_flush_writes_once() {
        let bars = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let make_writer = SuspendingMakeWriter::new(bars, Mutex::new(Vec::new()));

        let mut writer = make_writer.make_writer();
        writer.write_all(b"line\n").unwrap();
        writer.flush().unwrap();
        drop(writer);

        assert_eq!(make_writer.inner.lock().unwrap().as_slice(), b"line\n");
    }
}
