//! HTTP routes for registration endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, health, prompt, RegistrationHandlers};

/// Create the registration API router.
///
/// # Routes
///
/// - `POST /api/chat` - One dialogue turn
/// - `POST /api/prompt` - Raw prompt passthrough
/// - `GET /health` - Liveness probe
pub fn registration_routes() -> Router<RegistrationHandlers> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/prompt", post(prompt))
        .route("/health", get(health))
}
