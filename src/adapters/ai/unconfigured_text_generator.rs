//! Text generator used when no provider is configured.

use async_trait::async_trait;

use crate::ports::{AIError, ProviderInfo, TextGenerator};

/// Fails every call with `AIError::NotConfigured`.
///
/// The dialogue still works with it: every question and closing message
/// uses the fixed templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredTextGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AIError> {
        Err(AIError::NotConfigured)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("disabled", "none")
    }
}
