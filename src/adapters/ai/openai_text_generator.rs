//! OpenAI Text Generator - `TextGenerator` over an OpenAI-compatible API.
//!
//! Sends a single user message to the chat completions endpoint and returns
//! the first choice's content.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let generator = OpenAITextGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, ProviderInfo, TextGenerator};

/// Configuration for the OpenAI text generator.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible text generator.
pub struct OpenAITextGenerator {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAITextGenerator {
    /// Creates a generator with the given configuration.
    ///
    /// # Errors
    ///
    /// `AIError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(&self, prompt: &str) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
        }
    }

    async fn send_request(&self, prompt: &str) -> Result<Response, AIError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&self.to_openai_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to errors.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses "try again in Xs" from an error body, defaulting to 30 seconds.
    fn parse_retry_after(error_body: &str) -> u32 {
        let message = serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_owned));

        message
            .and_then(|s| {
                let rest = &s[s.find("try again in ")? + "try again in ".len()..];
                let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
                rest[..end].parse::<u32>().ok()
            })
            .unwrap_or(30)
    }

    async fn parse_response(response: Response) -> Result<String, AIError> {
        let response = Self::handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        first_choice_content(openai_response)
    }
}

/// Returns the trimmed content of the first choice.
fn first_choice_content(response: OpenAIResponse) -> Result<String, AIError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(AIError::EmptyResponse)
}

#[async_trait]
impl TextGenerator for OpenAITextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AIError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(prompt).await {
                Ok(response) => Self::parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(text) => return Ok(text),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        attempt = retry_count + 1,
                        "Text generation failed, retrying"
                    );
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}
