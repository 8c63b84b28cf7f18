//! Batch driver: load, classify, persist row by row

use super::error::PipelineError;
use super::input::load_records;
use super::output::CsvSink;
use super::processor::RecordProcessor;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs the whole batch strictly sequentially.
///
/// The input is read fully before the output is touched, so a bad input
/// file never truncates a previous result file.
pub struct PipelineDriver {
    input_path: PathBuf,
    output_path: PathBuf,
    processor: RecordProcessor,
    progress: Arc<dyn ProgressHandler>,
}

impl PipelineDriver {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        processor: RecordProcessor,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            processor,
            progress: Arc::new(NoOpHandler),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn processor(&self) -> &RecordProcessor {
        &self.processor
    }

    /// Processes every article and returns how many rows were written.
    pub async fn run(&self) -> Result<usize, PipelineError> {
        let records = load_records(&self.input_path)?;
        let total = records.len();
        info!(
            articles = total,
            input = %self.input_path.display(),
            "Loaded articles"
        );

        let mut sink = CsvSink::create(&self.output_path, &self.processor.header())?;
        debug!(output = %sink.path().display(), "Header written");

        self.progress.on_progress(&ProgressEvent::Started { total });

        for (position, record) in records.iter().enumerate() {
            let index = position + 1;
            let started = Instant::now();

            self.progress.on_progress(&ProgressEvent::RecordStarted {
                index,
                total,
                name: record.name.clone(),
            });

            let result = self
                .processor
                .process_reporting(index, record, self.progress.as_ref())
                .await;
            sink.append(&result)?;

            self.progress.on_progress(&ProgressEvent::RecordComplete {
                index,
                total,
                name: result.name.clone(),
                duration: started.elapsed(),
            });
        }

        Ok(total)
    }
}

impl std::fmt::Debug for PipelineDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineDriver")
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("processor", &self.processor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{MockClassifier, TextClassifier};
    use crate::pipeline::processor::Backend;
    use crate::prompt::PromptTemplate;
    use std::fs;
    use tempfile::TempDir;

    fn driver(dir: &TempDir, input: &str) -> PipelineDriver {
        let input_path = dir.path().join("in.json");
        fs::write(&input_path, input).unwrap();

        let backends = vec![Backend::new(
            "gemma2",
            Arc::new(MockClassifier::always("gemma2", "Oui")) as Arc<dyn TextClassifier>,
        )];
        let processor = RecordProcessor::new(PromptTemplate::default(), backends);
        PipelineDriver::new(input_path, dir.path().join("out.csv"), processor)
    }

    #[tokio::test]
    async fn test_run_writes_one_row_per_record() {
        let dir = TempDir::new().unwrap();
        let driver = driver(&dir, r#"[{"name": "a"}, {"name": "b"}]"#);

        assert_eq!(driver.run().await.unwrap(), 2);

        let content = fs::read_to_string(driver.output_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["name,description,url,gemma2_response", "a,,,Oui", "b,,,Oui"]);
    }

    #[tokio::test]
    async fn test_bad_input_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        let driver = driver(&dir, "not json");
        fs::write(driver.output_path(), "previous results\n").unwrap();

        let err = driver.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::InputParse { .. }));
        assert_eq!(
            fs::read_to_string(driver.output_path()).unwrap(),
            "previous results\n"
        );
    }
}
