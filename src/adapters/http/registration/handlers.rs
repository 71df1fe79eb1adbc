//! HTTP handlers for registration endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    EchoPromptCommand, EchoPromptError, EchoPromptHandler, SubmitMessageCommand,
    SubmitMessageError, SubmitMessageHandler,
};

use super::dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, PromptRequest, PromptResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RegistrationHandlers {
    submit_handler: Arc<SubmitMessageHandler>,
    echo_handler: Arc<EchoPromptHandler>,
}

impl RegistrationHandlers {
    pub fn new(
        submit_handler: Arc<SubmitMessageHandler>,
        echo_handler: Arc<EchoPromptHandler>,
    ) -> Self {
        Self {
            submit_handler,
            echo_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Submit one dialogue turn
pub async fn chat(
    State(handlers): State<RegistrationHandlers>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let Some(user_id) = req.user_id.filter(|id| !id.is_empty()) else {
        return bad_request("userId is required");
    };

    let cmd = SubmitMessageCommand {
        user_id,
        message: req.message,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ChatResponse::from(result))).into_response(),
        Err(e) => handle_submit_error(e),
    }
}

/// POST /api/prompt - Send a raw prompt to the text generator
pub async fn prompt(
    State(handlers): State<RegistrationHandlers>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let Some(prompt) = req.prompt else {
        return bad_request("prompt is required");
    };

    match handlers.echo_handler.handle(EchoPromptCommand { prompt }).await {
        Ok(result) => (StatusCode::OK, Json(PromptResponse::from(result))).into_response(),
        Err(e) => handle_echo_error(e),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn handle_submit_error(error: SubmitMessageError) -> Response {
    match &error {
        SubmitMessageError::InvalidUserId(e) => bad_request(e.to_string()),
        SubmitMessageError::Persistence(_)
        | SubmitMessageError::Session(_)
        | SubmitMessageError::IncompleteRecord(_) => {
            tracing::error!(error = %error, "Dialogue turn failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Failed to process message")),
            )
                .into_response()
        }
    }
}

fn handle_echo_error(error: EchoPromptError) -> Response {
    match &error {
        EchoPromptError::EmptyPrompt => bad_request(error.to_string()),
        EchoPromptError::Generation(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::service_unavailable(
                "Text generation is unavailable",
            )),
        )
            .into_response(),
    }
}
