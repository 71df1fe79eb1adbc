//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `REGISTRATION_DIALOG` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use registration_dialog::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod dialogue;
mod error;
mod record_store;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use record_store::{RecordStoreBackend, RecordStoreConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// in-memory service with text generation disabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Text generator configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Record store configuration
    #[serde(default)]
    pub record_store: RecordStoreConfig,

    /// Dialogue behaviour
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REGISTRATION_DIALOG` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `REGISTRATION_DIALOG__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `REGISTRATION_DIALOG__RECORD_STORE__URL=...` -> `record_store.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REGISTRATION_DIALOG")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.record_store.validate()?;
        self.dialogue.validate()?;
        // Generation must give up before the HTTP layer cancels the turn.
        if self.dialogue.generation_timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::InvalidGenerationTimeout);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "REGISTRATION_DIALOG__SERVER__PORT",
        "REGISTRATION_DIALOG__SERVER__ENVIRONMENT",
        "REGISTRATION_DIALOG__AI__PROVIDER",
        "REGISTRATION_DIALOG__AI__API_KEY",
        "REGISTRATION_DIALOG__RECORD_STORE__BACKEND",
        "REGISTRATION_DIALOG__RECORD_STORE__URL",
        "REGISTRATION_DIALOG__RECORD_STORE__TABLE",
        "REGISTRATION_DIALOG__DIALOGUE__REPHRASE_PROMPTS",
        "REGISTRATION_DIALOG__DIALOGUE__SESSION_IDLE_TTL_SECS",
        "REGISTRATION_DIALOG__DIALOGUE__GENERATION_TIMEOUT_SECS",
        "REGISTRATION_DIALOG__SERVER__REQUEST_TIMEOUT_SECS",
    ];

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for key in VARS {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn test_load_with_empty_environment() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.provider, AiProvider::Disabled);
        assert_eq!(config.record_store.backend, RecordStoreBackend::Memory);
        assert!(!config.dialogue.rephrase_prompts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nested_values() {
        let config = load_with(&[
            ("REGISTRATION_DIALOG__SERVER__PORT", "3000"),
            ("REGISTRATION_DIALOG__AI__PROVIDER", "openai"),
            ("REGISTRATION_DIALOG__AI__API_KEY", "sk-test"),
            ("REGISTRATION_DIALOG__RECORD_STORE__BACKEND", "postgres"),
            ("REGISTRATION_DIALOG__RECORD_STORE__URL", "postgres://localhost/registrations"),
            ("REGISTRATION_DIALOG__RECORD_STORE__TABLE", "signups"),
            ("REGISTRATION_DIALOG__DIALOGUE__REPHRASE_PROMPTS", "true"),
            ("REGISTRATION_DIALOG__DIALOGUE__SESSION_IDLE_TTL_SECS", "600"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.ai.provider, AiProvider::OpenAI);
        assert_eq!(
            config.ai.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("sk-test")
        );
        assert_eq!(config.record_store.backend, RecordStoreBackend::Postgres);
        assert_eq!(config.record_store.table, "signups");
        assert!(config.dialogue.rephrase_prompts);
        assert_eq!(config.dialogue.session_idle_ttl_secs, Some(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let config = load_with(&[("REGISTRATION_DIALOG__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_reports_missing_api_key() {
        let config = load_with(&[("REGISTRATION_DIALOG__AI__PROVIDER", "openai")]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
    }

    #[test]
    fn test_unknown_provider_fails_to_load() {
        let result = load_with(&[("REGISTRATION_DIALOG__AI__PROVIDER", "carrier-pigeon")]);
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_generation_timeout_must_undercut_request_timeout() {
        let config = load_with(&[
            ("REGISTRATION_DIALOG__SERVER__REQUEST_TIMEOUT_SECS", "10"),
            ("REGISTRATION_DIALOG__DIALOGUE__GENERATION_TIMEOUT_SECS", "10"),
        ])
        .unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidGenerationTimeout)
        );

        let config = load_with(&[
            ("REGISTRATION_DIALOG__SERVER__REQUEST_TIMEOUT_SECS", "10"),
            ("REGISTRATION_DIALOG__DIALOGUE__GENERATION_TIMEOUT_SECS", "9"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }
}
