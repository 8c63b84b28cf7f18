//! Loading the article collection

use super::error::PipelineError;
use super::record::ArticleRecord;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads every article from a JSON array file, in file order.
pub fn load_records(path: &Path) -> Result<Vec<ArticleRecord>, PipelineError> {
    debug!(path = %path.display(), "Loading JSON data");

    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            PipelineError::InputNotFound(path.to_path_buf())
        } else {
            PipelineError::InputRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records = parse_records(&content).map_err(|err| match err {
        ParseFailure::Json(source) => PipelineError::InputParse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Shape(message) => PipelineError::InputShape {
            path: path.to_path_buf(),
            message,
        },
    })?;

    debug!(count = records.len(), "Loaded articles from JSON");
    Ok(records)
}

enum ParseFailure {
    Json(serde_json::Error),
    Shape(String),
}

fn parse_records(content: &str) -> Result<Vec<ArticleRecord>, ParseFailure> {
    let value: Value = serde_json::from_str(content).map_err(ParseFailure::Json)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ParseFailure::Shape(format!(
                "expected a JSON array, found {}",
                kind_of(&other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(ArticleRecord::from_object(object)),
            other => Err(ParseFailure::Shape(format!(
                "element {} is {}, expected an object",
                index,
                kind_of(other)
            ))),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
