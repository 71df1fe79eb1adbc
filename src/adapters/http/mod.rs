//! HTTP adapters - REST API implementations.
//!
//! `router` assembles the registration routes with the cross-cutting layers:
//! CORS, request timeout and request tracing.

pub mod registration;

pub use registration::{registration_routes, RegistrationHandlers};

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the application router.
///
/// Configured CORS origins that fail to parse as header values are skipped
/// with a warning; with no origins configured, CORS is permissive.
pub fn router(handlers: RegistrationHandlers, server: &ServerConfig) -> Router {
    registration_routes()
        .with_state(handlers)
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
