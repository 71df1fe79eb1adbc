//! Per-user dialogue session.

use serde::{Deserialize, Serialize};

use super::fields::{FieldName, FieldUpdates, RegistrationFields};
use super::record::RegistrationRecord;
use super::state::DialogueState;
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp, UserId};

/// Dialogue progress for one user identifier.
///
/// Created on the first message from a new user with `current_step = name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user_id: UserId,
    fields: RegistrationFields,
    current_step: FieldName,
    state: DialogueState,
    closing_message: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Starts a new session at the first field.
    pub fn new(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            fields: RegistrationFields::new(),
            current_step: FieldName::Name,
            state: DialogueState::Collecting,
            closing_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn fields(&self) -> &RegistrationFields {
        &self.fields
    }

    /// The field most recently prompted for.
    pub fn current_step(&self) -> FieldName {
        self.current_step
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == DialogueState::Complete
    }

    /// Closing message stored at completion, if one was produced.
    pub fn closing_message(&self) -> Option<&str> {
        self.closing_message.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Merges a turn's updates into the field set.
    ///
    /// Ignored once the session is complete.
    pub fn apply_updates(&mut self, updates: &FieldUpdates) {
        if !self.state.accepts_field_updates() {
            return;
        }
        self.fields = self.fields.merge(updates);
        self.touch();
    }

    /// Records which field the user is being asked for.
    pub fn prompt_for(&mut self, field: FieldName) {
        self.current_step = field;
        self.touch();
    }

    /// Freezes the fields into a record and marks the session complete.
    ///
    /// # Errors
    ///
    /// - `IncompleteRecord` if applicable fields are still unset
    /// - `InvalidStateTransition` if the session is already complete
    pub fn complete(&mut self) -> Result<RegistrationRecord, DomainError> {
        let next_state = self
            .state
            .transition_to(DialogueState::Complete)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        let record = RegistrationRecord::from_fields(self.user_id.clone(), &self.fields)?;

        self.fields = record.fields();
        self.state = next_state;
        self.touch();
        Ok(record)
    }

    /// Stores the closing message shown at completion.
    pub fn set_closing_message(&mut self, message: impl Into<String>) {
        self.closing_message = Some(message.into());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::fields::Gender;

    fn session() -> Session {
        Session::new(UserId::new("u1").unwrap())
    }

    fn all_but_budget() -> FieldUpdates {
        FieldUpdates {
            name: Some("Ada".to_string()),
            date_of_birth: Some("1990-05-10".to_string()),
            gender: Some(Gender::Male),
            uses_budget_app: Some(false),
            budget_app_name: None,
            clear_budget_app_name: true,
        }
    }

    #[test]
    fn new_session_starts_at_name() {
        let session = session();
        assert_eq!(session.current_step(), FieldName::Name);
        assert_eq!(session.state(), DialogueState::Collecting);
        assert_eq!(session.fields(), &RegistrationFields::new());
        assert_eq!(session.closing_message(), None);
    }

    #[test]
    fn apply_updates_merges_fields() {
        let mut session = session();
        session.apply_updates(&all_but_budget());
        assert_eq!(session.fields().name.as_deref(), Some("Ada"));
        assert!(!session.updated_at().is_before(&session.created_at()));
    }

    #[test]
    fn complete_freezes_record() {
        let mut session = session();
        session.apply_updates(&all_but_budget());

        let record = session.complete().unwrap();

        assert!(session.is_complete());
        assert_eq!(record.name, "Ada");
        assert_eq!(record.user_id.as_str(), "u1");
    }

    #[test]
    fn complete_fails_when_fields_missing() {
        let mut session = session();
        let err = session.complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::IncompleteRecord);
        assert!(!session.is_complete());
    }

    #[test]
    fn complete_twice_is_rejected() {
        let mut session = session();
        session.apply_updates(&all_but_budget());
        session.complete().unwrap();

        let err = session.complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn completed_session_ignores_updates() {
        let mut session = session();
        session.apply_updates(&all_but_budget());
        session.complete().unwrap();

        let before = session.fields().clone();
        session.apply_updates(&FieldUpdates {
            budget_app_name: Some("YNAB".to_string()),
            ..Default::default()
        });
        assert_eq!(session.fields(), &before);
    }
}
