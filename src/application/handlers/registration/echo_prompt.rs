//! EchoPromptHandler - Passes a prompt straight to the text generator.
//!
//! Bypasses the dialogue entirely; no session is read or written.

use std::sync::Arc;

use crate::ports::{AIError, TextGenerator};

/// Command carrying a raw prompt.
#[derive(Debug, Clone)]
pub struct EchoPromptCommand {
    pub prompt: String,
}

/// Generated reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoPromptResult {
    pub reply: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EchoPromptError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("text generation failed: {0}")]
    Generation(#[from] AIError),
}

/// Handler for raw prompts.
pub struct EchoPromptHandler {
    generator: Arc<dyn TextGenerator>,
}

impl EchoPromptHandler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, cmd: EchoPromptCommand) -> Result<EchoPromptResult, EchoPromptError> {
        if cmd.prompt.trim().is_empty() {
            return Err(EchoPromptError::EmptyPrompt);
        }

        let reply = self.generator.generate(&cmd.prompt).await.map_err(|err| {
            tracing::warn!(
                provider = %self.generator.provider_info().name,
                error = %err,
                "Prompt generation failed"
            );
            err
        })?;

        Ok(EchoPromptResult { reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;

    fn cmd(prompt: &str) -> EchoPromptCommand {
        EchoPromptCommand {
            prompt: prompt.to_string(),
        }
    }

    #[tokio::test]
    async fn returns_generated_reply() {
        let generator = MockTextGenerator::new().with_response("Paris");
        let handler = EchoPromptHandler::new(Arc::new(generator.clone()));

        let result = handler.handle(cmd("Capital of France?")).await.unwrap();

        assert_eq!(result.reply, "Paris");
        assert_eq!(generator.prompts(), vec!["Capital of France?".to_string()]);
    }

    #[tokio::test]
    async fn rejects_blank_prompt_without_calling_generator() {
        let generator = MockTextGenerator::new();
        let handler = EchoPromptHandler::new(Arc::new(generator.clone()));

        let err = handler.handle(cmd("  ")).await.unwrap_err();

        assert!(matches!(err, EchoPromptError::EmptyPrompt));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn surfaces_generation_failure() {
        let handler =
            EchoPromptHandler::new(Arc::new(MockTextGenerator::failing(AIError::EmptyResponse)));

        let err = handler.handle(cmd("hi")).await.unwrap_err();

        assert!(matches!(err, EchoPromptError::Generation(AIError::EmptyResponse)));
    }
}
