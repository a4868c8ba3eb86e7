//! Test helper functions and utilities

use anyhow::Result;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Initialize test logging with environment-based configuration.
///
/// Safe to call multiple times - subsequent calls are ignored.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Create a test timeout wrapper for async operations.
///
/// Returns an error if the wrapped future doesn't complete within the specified duration.
///
/// # Examples
///
/// ```ignore
/// let result = with_timeout(Duration::from_secs(5), repository.count()).await?;
/// ```
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl std::future::Future<Output = T>,
) -> Result<T> {
    timeout(duration, future)
        .await
        .map_err(|_| anyhow::anyhow!("Test timeout after {:?}", duration))
}

/// In-memory sink for formatted log output.
///
/// Install it for the duration of a closure with [`LogCapture::capture`]
/// and inspect what was logged with [`LogCapture::contents`].
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl std::fmt::Debug for LogCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogCapture")
            .field("bytes", &self.buffer.lock().len())
            .finish()
    }
}

impl LogCapture {
    /// Create an empty capture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with a thread-local subscriber writing into this capture
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    /// Everything logged so far
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Lines logged at the given level (`"ERROR"`, `"WARN"`, ...)
    #[must_use]
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.split_whitespace().any(|word| word == level))
            .map(str::to_string)
            .collect()
    }
}

/// Writer handed out by [`LogCapture`]
#[derive(Debug)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_capture_records_levels() {
        let capture = LogCapture::new();
        capture.capture(|| {
            tracing::info!("all good");
            tracing::error!(secret = "DB password", "could not read");
        });

        assert!(capture.contents().contains("all good"));
        let errors = capture.lines_at("ERROR");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("could not read"));
        assert!(capture.lines_at("WARN").is_empty());
    }
}
