//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while the batch advances.
///
/// Positions are 1-based: the first article is `index == 1`.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Input loaded, output header written
    Started { total: usize },

    /// An article is about to be classified
    RecordStarted {
        index: usize,
        total: usize,
        name: String,
    },

    /// One backend returned for the current article
    BackendAnswered {
        index: usize,
        backend: String,
        elapsed: Duration,
        failed: bool,
    },

    /// The article's row has been written and flushed
    RecordComplete {
        index: usize,
        total: usize,
        name: String,
        duration: Duration,
    },
}

/// Receives progress events from the pipeline driver
pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// Ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
