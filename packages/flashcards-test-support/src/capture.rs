//! In-memory log capture.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// A shared byte buffer that collects formatted log output.
///
/// Usable as a `MakeWriter` for any fmt-style layer, or through
/// [`CapturedLogs::capture`] which installs a thread-local subscriber for
/// the duration of a closure.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with every event at TRACE and above written into this buffer.
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }

    /// Captured output split into non-empty lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panicking writer must not hide earlier output from the test.
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub struct CapturedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing::{info, warn};

    use super::*;

    #[test]
    fn captures_events_inside_closure_only() {
        let logs = CapturedLogs::new();
        info!("outside");
        let value = logs.capture(|| {
            warn!(deck = "ABCD", "inside");
            7
        });

        assert_eq!(value, 7);
        assert!(logs.contains("inside"));
        assert!(logs.contains("deck=\"ABCD\""));
        assert!(!logs.contains("outside"));
        assert_eq!(logs.lines().len(), 1);
    }
}
