//! HTTP adapter for registration endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, PromptRequest, PromptResponse,
};
pub use handlers::RegistrationHandlers;
pub use routes::registration_routes;
