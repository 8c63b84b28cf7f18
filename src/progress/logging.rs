//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that reports progress through tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => {
                info!(articles = total, "Processing articles");
            }
            ProgressEvent::RecordStarted { index, total, name } => {
                info!(
                    progress = format!("{}/{}", index, total),
                    article = %name,
                    "Classifying article"
                );
            }
            ProgressEvent::BackendAnswered {
                index,
                backend,
                elapsed,
                failed,
            } => {
                if *failed {
                    warn!(
                        index,
                        backend = %backend,
                        elapsed_ms = elapsed.as_millis(),
                        "Backend failed, error recorded in row"
                    );
                } else {
                    debug!(
                        index,
                        backend = %backend,
                        elapsed_ms = elapsed.as_millis(),
                        "Backend answered"
                    );
                }
            }
            ProgressEvent::RecordComplete {
                index,
                total,
                name,
                duration,
            } => {
                info!(
                    progress = format!("{}/{}", index, total),
                    article = %name,
                    duration_ms = duration.as_millis(),
                    "Processed article"
                );
            }
        }
    }
}
