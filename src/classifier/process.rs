//! Backends run as external processes
//!
//! The prompt is written to the child's stdin and its stdout is the answer,
//! e.g. `ollama run gemma2:9b`. There is no structured protocol.

use super::client::{ClassifierError, TextClassifier};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

pub const DEFAULT_PROGRAM: &str = "ollama";
pub const DEFAULT_PROGRAM_ARGS: &[&str] = &["run"];

const PROMPT_PREVIEW_CHARS: usize = 100;

/// Raw result of one backend invocation
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Runs `<program> <args...> <model>` once per prompt.
#[derive(Debug, Clone)]
pub struct ProcessClassifier {
    program: String,
    args: Vec<String>,
    model: String,
    timeout: Option<Duration>,
}

impl ProcessClassifier {
    pub fn new(program: impl Into<String>, args: Vec<String>, model: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            model: model.into(),
            timeout: None,
        }
    }

    /// `ollama run <model>`
    pub fn ollama(model: impl Into<String>) -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_PROGRAM_ARGS.iter().map(|s| s.to_string()).collect(),
            model,
        )
    }

    /// Bounds the wait for the child. `None` waits until it exits.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Spawns the backend, feeds it the prompt and collects its output.
    pub async fn run(&self, prompt: &str) -> Result<ProcessOutput, ClassifierError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_to_completion(prompt))
                .await
                .map_err(|_| ClassifierError::Timeout {
                    backend: self.model.clone(),
                    timeout: limit,
                })?,
            None => self.run_to_completion(prompt).await,
        }
    }

    async fn run_to_completion(&self, prompt: &str) -> Result<ProcessOutput, ClassifierError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClassifierError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| ClassifierError::Other {
            message: format!("stdin of '{}' was not captured", self.program),
        })?;

        // Feed and drain together so a chatty child cannot fill its stdout pipe
        // while we are still blocked writing the prompt.
        let feed = async move {
            let written = stdin.write_all(prompt.as_bytes()).await;
            drop(stdin);
            written
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());

        match written {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!(backend = %self.model, "Backend closed stdin before reading the whole prompt");
            }
            Err(source) => {
                return Err(ClassifierError::Io {
                    program: self.program.clone(),
                    source,
                })
            }
        }

        let output = output.map_err(|source| ClassifierError::Io {
            program: self.program.clone(),
            source,
        })?;

        Ok(ProcessOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl TextClassifier for ProcessClassifier {
    async fn answer(&self, prompt: &str) -> Result<String, ClassifierError> {
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        debug!(backend = %self.model, prompt = %preview, "Running backend");

        let output = self.run(prompt).await?;
        if !output.status.success() {
            warn!(
                backend = %self.model,
                status = %output.status,
                stderr = %output.stderr.trim(),
                "Backend exited with failure"
            );
        }

        let response = output.stdout.trim().to_string();
        debug!(backend = %self.model, response = %response, "Backend response");
        Ok(response)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
