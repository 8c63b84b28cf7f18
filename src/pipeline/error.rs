use std::path::PathBuf;
use thiserror::Error;

/// Fatal batch errors. Per-backend failures never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to read input file {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {path} is not valid JSON: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input file {path} has an unexpected shape: {message}")]
    InputShape { path: PathBuf, message: String },

    #[error("Failed to open output file {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Returns a user-facing message with a troubleshooting hint
    pub fn help_message(&self) -> String {
        match self {
            PipelineError::InputNotFound(path) => format!(
                "Error: input file not found\nPath: {}\n\n\
                 Help: pass the article collection with --input or set NEWSJUDGE_INPUT.",
                path.display()
            ),
            PipelineError::InputParse { .. } | PipelineError::InputShape { .. } => format!(
                "Error: {}\n\n\
                 Help: the input must be a JSON array of objects with \
                 \"name\", \"description\" and \"url\" keys.",
                self
            ),
            PipelineError::OutputOpen { path, .. } => format!(
                "Error: {}\n\n\
                 Help: check that the directory of {} exists and is writable.",
                self,
                path.display()
            ),
            PipelineError::OutputWrite { .. } => format!(
                "Error: {}\n\n\
                 Note: rows written before the failure are kept in the output file.",
                self
            ),
            PipelineError::InputRead { .. } => format!("Error: {}", self),
        }
    }
}
