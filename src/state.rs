//! Process-wide shared state.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::sink::LogSink;

/// State shared by every concurrent handler invocation.
///
/// Exactly two pieces of mutable state cross request boundaries: the capture
/// counter and the open log file. The counter is a fetch-add atomic; the file
/// handle is guarded inside [`LogSink`]. Constructed once at startup and
/// injected into handlers, never global.
pub struct ServerState {
    counter: AtomicU64,
    sink: LogSink,
}

impl ServerState {
    pub fn new(sink: LogSink) -> Self {
        Self {
            counter: AtomicU64::new(1),
            sink,
        }
    }

    /// Claim the next sequence number. Strictly increasing across the
    /// process lifetime, starting at 1, never reset by downstream failures.
    pub fn next_sequence(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }
}
