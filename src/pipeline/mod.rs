//! Batch classification pipeline
//!
//! [`PipelineDriver`] loads the article collection, hands each article to a
//! [`RecordProcessor`] and appends the resulting row to a [`CsvSink`],
//! syncing it to disk before moving on.

pub mod driver;
pub mod error;
pub mod input;
pub mod output;
pub mod processor;
pub mod record;

pub use driver::PipelineDriver;
pub use error::PipelineError;
pub use input::load_records;
pub use output::CsvSink;
pub use processor::{error_marker, Backend, RecordProcessor, ERROR_PREFIX};
pub use record::{header, response_column, ArticleRecord, BackendResponse, ClassificationResult};
