//! SubmitMessageHandler - Runs one dialogue turn for a user.
//!
//! Each turn loads (or creates) the user's session, extracts whatever fields
//! the message supplies, and either asks for the next missing field or
//! completes the registration. Completion persists the record and asks the
//! text generator for a closing message, falling back to a fixed template.
//!
//! Turns for the same user are serialized; different users run in parallel.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};
use crate::domain::registration::{
    closing_instruction, fallback_closing_message, next_field, prompt_for, rephrase_instruction,
    FieldExtractor, FieldName, RegistrationFields, Session,
};
use crate::ports::{AIError, RecordStore, RecordStoreError, SessionStore, TextGenerator};

use super::user_locks::UserLocks;

/// Command carrying one user message.
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub user_id: String,
    /// Absent and whitespace-only messages restart the prompt at `name`.
    pub message: Option<String>,
}

/// Reply for one turn.
///
/// `data` is present only when `done` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitMessageResult {
    pub reply: String,
    pub done: bool,
    pub data: Option<RegistrationFields>,
}

impl SubmitMessageResult {
    fn asking(reply: String) -> Self {
        Self {
            reply,
            done: false,
            data: None,
        }
    }

    fn finished(reply: String, fields: RegistrationFields) -> Self {
        Self {
            reply,
            done: true,
            data: Some(fields),
        }
    }
}

/// Errors that end a turn without a reply.
#[derive(Debug, thiserror::Error)]
pub enum SubmitMessageError {
    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] ValidationError),

    #[error("session store failed: {0}")]
    Session(DomainError),

    #[error("failed to persist registration: {0}")]
    Persistence(#[from] RecordStoreError),

    #[error("registration incomplete: {0}")]
    IncompleteRecord(DomainError),
}

impl From<DomainError> for SubmitMessageError {
    fn from(err: DomainError) -> Self {
        match err.code() {
            ErrorCode::IncompleteRecord => Self::IncompleteRecord(err),
            _ => Self::Session(err),
        }
    }
}

/// Settings for the dialogue.
#[derive(Debug, Clone)]
pub struct DialogueSettings {
    /// Table completed records are inserted into.
    pub table: String,
    /// Ask the text generator to phrase each question.
    pub rephrase_prompts: bool,
    /// Upper bound on a single generator call; a slower call falls back.
    pub generation_timeout: Duration,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            table: "registrations".to_string(),
            rephrase_prompts: false,
            generation_timeout: Duration::from_secs(20),
        }
    }
}

/// Handler for dialogue turns.
pub struct SubmitMessageHandler {
    sessions: Arc<dyn SessionStore>,
    records: Arc<dyn RecordStore>,
    generator: Arc<dyn TextGenerator>,
    extractor: FieldExtractor,
    settings: DialogueSettings,
    locks: UserLocks,
}

impl SubmitMessageHandler {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        records: Arc<dyn RecordStore>,
        generator: Arc<dyn TextGenerator>,
        settings: DialogueSettings,
    ) -> Self {
        Self {
            sessions,
            records,
            generator,
            extractor: FieldExtractor::new(),
            settings,
            locks: UserLocks::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitMessageCommand,
    ) -> Result<SubmitMessageResult, SubmitMessageError> {
        let user_id = UserId::new(cmd.user_id)?;
        let _turn = self.locks.acquire(&user_id).await;

        let mut session = self
            .sessions
            .get(&user_id)
            .await
            .map_err(SubmitMessageError::Session)?
            .unwrap_or_else(|| Session::new(user_id.clone()));

        // 1. Completed sessions replay their closing message
        if session.is_complete() {
            tracing::debug!(user_id = %user_id, "Replaying closing message");
            let reply = session
                .closing_message()
                .map(str::to_owned)
                .unwrap_or_else(|| fallback_closing_message(session.fields()));
            return Ok(SubmitMessageResult::finished(reply, session.fields().clone()));
        }

        // 2. Empty message restarts the prompt at the first field
        let text = cmd.message.unwrap_or_default();
        if text.trim().is_empty() {
            session.prompt_for(FieldName::Name);
            self.save(&session).await?;
            let reply = self.question(FieldName::Name, session.fields()).await;
            return Ok(SubmitMessageResult::asking(reply));
        }

        // 3. Extract and merge
        let updates = self
            .extractor
            .extract(session.fields(), session.current_step(), &text);
        session.apply_updates(&updates);

        let next = next_field(session.fields());
        tracing::debug!(
            user_id = %user_id,
            step = %session.current_step(),
            extracted = ?updates.proposed_fields(),
            next = ?next,
            "Processed registration turn"
        );

        // 4. Ask for the next missing field
        if let Some(field) = next {
            session.prompt_for(field);
            self.save(&session).await?;
            let reply = self.question(field, session.fields()).await;
            return Ok(SubmitMessageResult::asking(reply));
        }

        // 5. Complete: the session stays complete even if the insert fails
        let record = session.complete()?;
        self.save(&session).await?;

        if let Err(err) = self.records.insert(&self.settings.table, &record).await {
            tracing::error!(
                user_id = %user_id,
                record_id = %record.id,
                error = %err,
                "Failed to persist registration"
            );
            return Err(err.into());
        }

        let reply = self.closing_message(session.fields()).await;
        session.set_closing_message(reply.clone());
        self.save(&session).await?;

        tracing::info!(user_id = %user_id, record_id = %record.id, "Registration completed");
        Ok(SubmitMessageResult::finished(reply, session.fields().clone()))
    }

    async fn save(&self, session: &Session) -> Result<(), SubmitMessageError> {
        self.sessions
            .upsert(session)
            .await
            .map_err(SubmitMessageError::Session)
    }

    /// Question for `field`, rephrased by the generator when enabled.
    async fn question(&self, field: FieldName, fields: &RegistrationFields) -> String {
        let fixed = prompt_for(field, fields);
        if !self.settings.rephrase_prompts {
            return fixed;
        }

        match self.generate(&rephrase_instruction(field, fields)).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(field = %field, error = %err, "Prompt rephrasing failed, using fixed question");
                fixed
            }
        }
    }

    async fn closing_message(&self, fields: &RegistrationFields) -> String {
        match self.generate(&closing_instruction(fields)).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "Closing message generation failed, using template");
                fallback_closing_message(fields)
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, AIError> {
        let timeout = self.settings.generation_timeout;
        tokio::time::timeout(timeout, self.generator.generate(prompt))
            .await
            .unwrap_or_else(|_| {
                Err(AIError::Timeout {
                    timeout_secs: u32::try_from(timeout.as_secs()).unwrap_or(u32::MAX),
                })
            })
    }
}
