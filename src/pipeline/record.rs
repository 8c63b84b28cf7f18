//! Article records and result rows

use serde_json::{Map, Value};

/// One input article. Missing or `null` fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleRecord {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl ArticleRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// Builds a record from a JSON object, ignoring unknown keys.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            name: field_text(object, "name"),
            description: field_text(object, "description"),
            url: field_text(object, "url"),
        }
    }
}

fn field_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One backend's answer, stored under `<label>_response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub label: String,
    pub text: String,
}

/// The persisted row for one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub name: String,
    pub description: String,
    pub url: String,
    pub responses: Vec<BackendResponse>,
}

impl ClassificationResult {
    /// Field values in header order.
    pub fn row(&self) -> Vec<&str> {
        let mut row = vec![self.name.as_str(), self.description.as_str(), self.url.as_str()];
        row.extend(self.responses.iter().map(|r| r.text.as_str()));
        row
    }

    pub fn response(&self, label: &str) -> Option<&str> {
        self.responses
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.text.as_str())
    }
}

/// Name of the output column holding a backend's answer.
pub fn response_column(label: &str) -> String {
    format!("{}_response", label)
}

/// Output header for the given backend labels.
pub fn header<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut columns = vec![
        "name".to_string(),
        "description".to_string(),
        "url".to_string(),
    ];
    columns.extend(labels.into_iter().map(response_column));
    columns
}
