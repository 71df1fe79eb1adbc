//! HTTP DTOs for registration endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{EchoPromptResult, SubmitMessageResult};
use crate::domain::registration::RegistrationFields;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One dialogue turn.
///
/// `user_id` is optional here so a missing value maps to our own 400 body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Raw prompt for the text generator.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply for one dialogue turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RegistrationFields>,
}

impl From<SubmitMessageResult> for ChatResponse {
    fn from(result: SubmitMessageResult) -> Self {
        Self {
            reply: result.reply,
            done: result.done,
            data: result.data,
        }
    }
}

/// Generated reply for a raw prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    pub reply: String,
}

impl From<EchoPromptResult> for PromptResponse {
    fn from(result: EchoPromptResult) -> Self {
        Self {
            reply: result.reply,
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: message.into(),
        }
    }
}
