//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be between 1 and 100")]
    InvalidPoolSize,

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Invalid AI base URL")]
    InvalidAiBaseUrl,

    #[error("Session idle TTL and sweep interval must be positive")]
    InvalidSessionTtl,

    #[error("Generation timeout must be positive and below the request timeout")]
    InvalidGenerationTimeout,
}
