//! Per-article classification across every backend

use super::record::{header, ArticleRecord, BackendResponse, ClassificationResult};
use crate::classifier::{ClassifierError, TextClassifier};
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::prompt::PromptTemplate;
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

/// Prefix of the marker stored in place of an answer a backend could not give.
pub const ERROR_PREFIX: &str = "Erreur";

pub fn error_marker(err: &ClassifierError) -> String {
    format!("{}: {}", ERROR_PREFIX, err)
}

/// A classifier together with the label of its output column
#[derive(Clone)]
pub struct Backend {
    label: String,
    classifier: Arc<dyn TextClassifier>,
}

impl Backend {
    pub fn new(label: impl Into<String>, classifier: Arc<dyn TextClassifier>) -> Self {
        Self {
            label: label.into(),
            classifier,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn classifier(&self) -> &Arc<dyn TextClassifier> {
        &self.classifier
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("label", &self.label)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

/// Renders the prompt once per article and asks every backend in order.
#[derive(Debug)]
pub struct RecordProcessor {
    template: PromptTemplate,
    backends: Vec<Backend>,
}

impl RecordProcessor {
    pub fn new(template: PromptTemplate, backends: Vec<Backend>) -> Self {
        Self { template, backends }
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Output header matching the rows this processor produces.
    pub fn header(&self) -> Vec<String> {
        header(self.backends.iter().map(Backend::label))
    }

    pub async fn process(&self, record: &ArticleRecord) -> ClassificationResult {
        self.process_reporting(1, record, &NoOpHandler).await
    }

    /// Like [`RecordProcessor::process`], emitting one event per backend.
    ///
    /// Every backend runs even when an earlier one failed.
    pub async fn process_reporting(
        &self,
        index: usize,
        record: &ArticleRecord,
        progress: &dyn ProgressHandler,
    ) -> ClassificationResult {
        let prompt = self.template.render(&record.name, &record.description);

        let mut responses = Vec::with_capacity(self.backends.len());
        for backend in &self.backends {
            let started = Instant::now();
            let (text, failed) = match backend.classifier.answer(&prompt).await {
                Ok(text) => (text, false),
                Err(err) => {
                    error!(
                        backend = %backend.label,
                        classifier = %backend.classifier.name(),
                        error = %err,
                        "Backend could not answer"
                    );
                    (error_marker(&err), true)
                }
            };

            progress.on_progress(&ProgressEvent::BackendAnswered {
                index,
                backend: backend.label.clone(),
                elapsed: started.elapsed(),
                failed,
            });

            responses.push(BackendResponse {
                label: backend.label.clone(),
                text,
            });
        }

        ClassificationResult {
            name: record.name.clone(),
            description: record.description.clone(),
            url: record.url.clone(),
            responses,
        }
    }
}
