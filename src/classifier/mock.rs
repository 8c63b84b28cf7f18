use super::client::{ClassifierError, TextClassifier};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted classifier for tests and dry runs.
///
/// Answers are served from a queue; once it is empty the fallback answer is
/// used, or an error is returned if none is set. Every prompt is recorded.
pub struct MockClassifier {
    name: String,
    responses: Mutex<VecDeque<MockResponse>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<String>>,
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error(String),
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

impl MockClassifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(VecDeque::new()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A classifier that gives the same answer to every prompt.
    pub fn always(name: impl Into<String>, answer: impl Into<String>) -> Self {
        let mut mock = Self::new(name);
        mock.fallback = Some(answer.into());
        mock
    }

    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        let mut queue = self.responses.lock().unwrap();
        queue.extend(responses);
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextClassifier for MockClassifier {
    async fn answer(&self, prompt: &str) -> Result<String, ClassifierError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Text(content)) => Ok(content.trim().to_string()),
            Some(MockResponse::Error(message)) => Err(ClassifierError::Other { message }),
            None => self.fallback.clone().ok_or_else(|| ClassifierError::Other {
                message: format!("MockClassifier '{}': no more responses in queue", self.name),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClassifier")
            .field("name", &self.name)
            .field("remaining_responses", &self.remaining_responses())
            .field("fallback", &self.fallback)
            .finish()
    }
}
