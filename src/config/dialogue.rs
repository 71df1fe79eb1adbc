//! Dialogue behaviour configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Ask the text generator to phrase each question
    #[serde(default)]
    pub rephrase_prompts: bool,

    /// Evict sessions idle longer than this; unset keeps them for the process lifetime
    pub session_idle_ttl_secs: Option<u64>,

    /// How often the eviction sweep runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Upper bound on one text generator call before falling back.
    /// Must stay below the server request timeout.
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,
}

impl DialogueConfig {
    /// Idle TTL as Duration, if eviction is enabled
    pub fn session_idle_ttl(&self) -> Option<Duration> {
        self.session_idle_ttl_secs.map(Duration::from_secs)
    }

    /// Get sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_idle_ttl_secs == Some(0) || self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.generation_timeout_secs == 0 {
            return Err(ValidationError::InvalidGenerationTimeout);
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            rephrase_prompts: false,
            session_idle_ttl_secs: None,
            sweep_interval_secs: default_sweep_interval(),
            generation_timeout_secs: default_generation_timeout(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_generation_timeout() -> u64 {
    20
}
