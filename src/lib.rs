//! newsjudge - relevance triage of news articles with local LLMs
//!
//! Each article of a JSON collection is rendered into a French yes/no prompt
//! and sent, one backend after another, to several local models (by default
//! through `ollama run`). The answers are written to a CSV file, one row per
//! article, synced to disk as soon as the row is complete.
//!
//! # Example
//!
//! ```no_run
//! use newsjudge::JudgeConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = JudgeConfig::default();
//! let driver = config.create_driver()?;
//! let rows = driver.run().await?;
//! println!("{} articles classified", rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`prompt`]: prompt template rendering
//! - [`classifier`]: the [`TextClassifier`] trait and its process and mock implementations
//! - [`pipeline`]: record processing, the batch driver, CSV output
//! - [`config`]: layered configuration
//! - [`progress`]: progress events and handlers

pub mod classifier;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod util;

pub use classifier::{ClassifierError, MockClassifier, ProcessClassifier, TextClassifier};
pub use config::{BackendSpec, ConfigError, JudgeConfig};
pub use pipeline::{
    ArticleRecord, Backend, ClassificationResult, PipelineDriver, PipelineError, RecordProcessor,
};
pub use prompt::{PromptError, PromptTemplate};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
