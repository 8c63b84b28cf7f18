//! Configuration management for newsjudge
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults ([`JudgeConfig::builtin`])
//! 2. an optional TOML file (`--config`)
//! 3. environment variables
//! 4. command-line flags (applied by the CLI handlers)
//!
//! # Environment Variables
//!
//! - `NEWSJUDGE_INPUT`: article collection (JSON) - default: "orange.json"
//! - `NEWSJUDGE_OUTPUT`: result table (CSV) - default: "resultats_articles.csv"
//! - `NEWSJUDGE_PROGRAM`: backend launcher - default: "ollama"
//! - `NEWSJUDGE_TIMEOUT`: per-backend timeout in seconds - default: none (wait forever)
//! - `NEWSJUDGE_LOG_LEVEL`: logging level - default: "info"
//!
//! # Config file
//!
//! ```toml
//! input = "articles.json"
//! output = "results.csv"
//! program = "ollama"
//! program_args = ["run"]
//! template = "prompt.txt"
//! timeout_secs = 120
//!
//! [[backends]]
//! label = "gemma2"
//! model = "gemma2:9b"
//! ```

use crate::classifier::{ProcessClassifier, TextClassifier, DEFAULT_PROGRAM, DEFAULT_PROGRAM_ARGS};
use crate::pipeline::{Backend, PipelineDriver, RecordProcessor};
use crate::prompt::{PromptError, PromptTemplate};
use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_INPUT: &str = "orange.json";
const DEFAULT_OUTPUT: &str = "resultats_articles.csv";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default backends as `(label, model)`, asked in this order.
pub const DEFAULT_BACKENDS: &[(&str, &str)] = &[
    ("mistral_nemo", "mistral-nemo:latest"),
    ("llama32", "llama3.2:latest"),
    ("gemma2", "gemma2:9b"),
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid backend '{0}'. Expected LABEL=MODEL or MODEL")]
    InvalidBackend(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Template(#[from] PromptError),
}

/// One classifier backend: the output column label and the model it runs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendSpec {
    pub label: String,
    pub model: String,
}

impl BackendSpec {
    pub fn new(label: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            model: model.into(),
        }
    }

    /// Column label derived from a model tag: `llama3.2:latest` -> `llama32`.
    pub fn label_for_model(model: &str) -> String {
        let base = model.split(':').next().unwrap_or(model);
        base.chars()
            .filter_map(|c| match c {
                '-' | '/' | ' ' => Some('_'),
                '.' => None,
                c => Some(c),
            })
            .collect()
    }
}

impl FromStr for BackendSpec {
    type Err = ConfigError;

    /// Parses `LABEL=MODEL`, or a bare `MODEL` whose label is derived.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (label, model) = match s.split_once('=') {
            Some((label, model)) => (label.trim().to_string(), model.trim().to_string()),
            None => (Self::label_for_model(s), s.to_string()),
        };

        if label.is_empty() || model.is_empty() {
            return Err(ConfigError::InvalidBackend(s.to_string()));
        }
        Ok(Self { label, model })
    }
}

/// Shape of the TOML config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    program: Option<String>,
    program_args: Option<Vec<String>>,
    template: Option<PathBuf>,
    timeout_secs: Option<u64>,
    log_level: Option<String>,
    backends: Option<Vec<BackendSpec>>,
}

/// Everything the batch needs to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeConfig {
    /// JSON array of articles
    pub input_path: PathBuf,

    /// CSV result table, truncated on every run
    pub output_path: PathBuf,

    /// Backends in the order they are asked
    pub backends: Vec<BackendSpec>,

    /// Launcher executable, run as `<program> <program_args...> <model>`
    pub program: String,

    pub program_args: Vec<String>,

    /// Custom prompt template; the built-in one is used when unset
    pub template_path: Option<PathBuf>,

    /// Per-backend wait limit; `None` waits until the backend exits
    pub timeout_secs: Option<u64>,

    pub log_level: String,
}

impl Default for JudgeConfig {
    /// Built-in defaults overridden by `NEWSJUDGE_*` environment variables
    fn default() -> Self {
        let mut config = Self::builtin();
        // An unparsable NEWSJUDGE_TIMEOUT is skipped here; `load` reports it
        let _ = config.apply_env();
        config
    }
}

impl JudgeConfig {
    /// Defaults with no environment or file applied
    pub fn builtin() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            backends: DEFAULT_BACKENDS
                .iter()
                .map(|(label, model)| BackendSpec::new(*label, *model))
                .collect(),
            program: DEFAULT_PROGRAM.to_string(),
            program_args: DEFAULT_PROGRAM_ARGS.iter().map(|s| s.to_string()).collect(),
            template_path: None,
            timeout_secs: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Builds the layered configuration: defaults, then `config_file`, then env.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::builtin();
        if let Some(path) = config_file {
            config.apply_file(path)?;
        }
        config.apply_env()?;
        Ok(config)
    }

    /// Overlays the keys present in a TOML config file.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Relative paths in the file are relative to the file itself
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };

        if let Some(input) = file.input {
            self.input_path = resolve(input);
        }
        if let Some(output) = file.output {
            self.output_path = resolve(output);
        }
        if let Some(template) = file.template {
            self.template_path = Some(resolve(template));
        }
        if let Some(program) = file.program {
            self.program = program;
        }
        if let Some(args) = file.program_args {
            self.program_args = args;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = Some(secs);
        }
        if let Some(level) = file.log_level {
            self.log_level = level.to_lowercase();
        }
        if let Some(backends) = file.backends {
            self.backends = backends;
        }
        Ok(())
    }

    /// Overlays `NEWSJUDGE_*` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(input) = env::var("NEWSJUDGE_INPUT") {
            self.input_path = PathBuf::from(input);
        }
        if let Ok(output) = env::var("NEWSJUDGE_OUTPUT") {
            self.output_path = PathBuf::from(output);
        }
        if let Ok(program) = env::var("NEWSJUDGE_PROGRAM") {
            self.program = program;
        }
        if let Ok(level) = env::var("NEWSJUDGE_LOG_LEVEL") {
            self.log_level = level.to_lowercase();
        }
        if let Ok(timeout) = env::var("NEWSJUDGE_TIMEOUT") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::ParseError {
                    field: "NEWSJUDGE_TIMEOUT".to_string(),
                    error: e.to_string(),
                })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Checks the configuration before anything is run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backends.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "At least one backend must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for backend in &self.backends {
            if backend.label.trim().is_empty() || backend.model.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "Backend label and model must not be empty (label '{}', model '{}')",
                    backend.label, backend.model
                )));
            }
            if !seen.insert(backend.label.as_str()) {
                return Err(ConfigError::ValidationFailed(format!(
                    "Duplicate backend label '{}': output columns must be unique",
                    backend.label
                )));
            }
        }

        if self.program.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Backend program must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "Timeout must be at least 1 second".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn load_template(&self) -> Result<PromptTemplate, ConfigError> {
        match &self.template_path {
            Some(path) => Ok(PromptTemplate::from_file(path)?),
            None => Ok(PromptTemplate::default()),
        }
    }

    /// One process-backed classifier per configured backend
    pub fn create_backends(&self) -> Vec<Backend> {
        self.backends
            .iter()
            .map(|spec| {
                let classifier = ProcessClassifier::new(
                    self.program.clone(),
                    self.program_args.clone(),
                    spec.model.clone(),
                )
                .with_timeout(self.timeout());
                Backend::new(spec.label.clone(), Arc::new(classifier) as Arc<dyn TextClassifier>)
            })
            .collect()
    }

    /// Validates the configuration and wires up the driver.
    pub fn create_driver(&self) -> Result<PipelineDriver, ConfigError> {
        self.validate()?;
        let processor = RecordProcessor::new(self.load_template()?, self.create_backends());
        Ok(PipelineDriver::new(
            self.input_path.clone(),
            self.output_path.clone(),
            processor,
        ))
    }
}

impl fmt::Display for JudgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "newsjudge configuration:")?;
        writeln!(f, "  Input: {}", self.input_path.display())?;
        writeln!(f, "  Output: {}", self.output_path.display())?;
        writeln!(
            f,
            "  Launcher: {} {}",
            self.program,
            self.program_args.join(" ")
        )?;
        for backend in &self.backends {
            writeln!(f, "  Backend: {} -> {}", backend.label, backend.model)?;
        }
        match &self.template_path {
            Some(path) => writeln!(f, "  Template: {}", path.display())?,
            None => writeln!(f, "  Template: built-in")?,
        }
        match self.timeout_secs {
            Some(secs) => writeln!(f, "  Timeout: {}s", secs)?,
            None => writeln!(f, "  Timeout: none")?,
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
