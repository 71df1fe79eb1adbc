//! Text Generator Port - Interface for language-model phrasing.
//!
//! The dialogue engine never depends on generated text for decisions. It asks
//! for a closing message (and optionally rephrased questions) and falls back
//! to fixed templates when generation fails. The echo endpoint is the only
//! caller that surfaces a failure.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl TextGenerator for Canned {
//!     async fn generate(&self, prompt: &str) -> Result<String, AIError> {
//!         Ok(format!("You said: {}", prompt))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("canned", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for single-prompt text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for a single prompt.
    ///
    /// Returns the trimmed, non-empty content of the first choice.
    ///
    /// # Errors
    ///
    /// `AIError::EmptyResponse` when the provider returns no usable content;
    /// other variants for transport and provider failures.
    async fn generate(&self, prompt: &str) -> Result<String, AIError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "mock").
    pub name: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Text generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Provider answered without any content.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// No provider is configured.
    #[error("text generation is not configured")]
    NotConfigured,
}

impl AIError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
