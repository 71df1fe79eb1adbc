//! Mock Text Generator for tests and local runs.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Simulated delays for interleaving tests
//! - Error injection for fallback testing
//! - Prompt recording for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("Welcome aboard, Ada!")
//!     .with_error(AIError::EmptyResponse);
//!
//! assert_eq!(generator.generate("...").await?, "Welcome aboard, Ada!");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, ProviderInfo, TextGenerator};

const DEFAULT_RESPONSE: &str = "Mock response";

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return generated text.
    Success(String),
    /// Return an error.
    Error(AIError),
}

/// Mock text generator.
///
/// Clones share the response queue and call history.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    fallback: Option<MockResponse>,
    info: ProviderInfo,
    delay: Duration,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    /// Creates a mock that answers "Mock response" once its queue is empty.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: None,
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock that fails every call with `error`.
    pub fn failing(error: AIError) -> Self {
        Self {
            fallback: Some(MockResponse::Error(error)),
            ..Self::new()
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Returns every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| MockResponse::Success(DEFAULT_RESPONSE.to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AIError> {
        lock(&self.prompts).push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
