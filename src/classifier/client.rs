use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failures that prevent a backend from producing an answer at all.
///
/// A backend that runs but exits with a non-zero status is not an error:
/// whatever it printed is still returned as its answer.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while talking to '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("backend '{backend}' timed out after {timeout:?}")]
    Timeout { backend: String, timeout: Duration },

    #[error("{message}")]
    Other { message: String },
}

/// Text-in, text-out relevance judge.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Sends the full prompt and returns the backend's trimmed answer.
    async fn answer(&self, prompt: &str) -> Result<String, ClassifierError>;

    fn name(&self) -> &str;
}
