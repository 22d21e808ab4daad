//! Shared test helpers for loop tests.

use std::sync::Mutex;

use iterthought_core::error::BackendError;
use iterthought_core::generator::{GenerationRequest, Generator};

/// A mock generator that returns a sequence of scripted responses.
///
/// Each call to `generate` records the request and returns the next
/// response in the queue. Panics if more calls are made than responses
/// provided, unless built with `repeating`.
pub struct SequentialMockGenerator {
    responses: Vec<String>,
    repeat_last: bool,
    failure: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl SequentialMockGenerator {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            repeat_last: false,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A generator that returns a single text response.
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![text.to_string()])
    }

    /// A generator that returns the same response for every call.
    pub fn repeating(text: &str) -> Self {
        let mut mock = Self::new(vec![text.to_string()]);
        mock.repeat_last = true;
        mock
    }

    /// A generator whose every call fails with a network error.
    pub fn failing(message: &str) -> Self {
        let mut mock = Self::new(Vec::new());
        mock.failure = Some(message.to_string());
        mock
    }

    /// How many calls have been made.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The recorded requests, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The recorded prompts, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Generator for SequentialMockGenerator {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, BackendError> {
        let mut requests = self.requests.lock().unwrap();
        let index = requests.len();
        requests.push(request);

        if let Some(message) = &self.failure {
            return Err(BackendError::Network(message.clone()));
        }

        if index >= self.responses.len() {
            if self.repeat_last {
                return Ok(self.responses.last().cloned().unwrap_or_default());
            }
            panic!(
                "SequentialMockGenerator: no more responses (call #{}, have {})",
                index + 1,
                self.responses.len()
            );
        }

        Ok(self.responses[index].clone())
    }
}
