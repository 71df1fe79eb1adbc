//! Text generator configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Text generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which generator backs the dialogue
    #[serde(default)]
    pub provider: AiProvider,

    /// API key for the OpenAI-compatible endpoint
    pub api_key: Option<Secret<String>>,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// Text generator backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAI,
    Mock,
    #[default]
    Disabled,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider != AiProvider::OpenAI {
            return Ok(());
        }
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}
