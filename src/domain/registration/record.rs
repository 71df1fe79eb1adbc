//! The frozen registration record handed to the record store.

use serde::{Deserialize, Serialize};

use super::fields::{FieldName, Gender, RegistrationFields};
use super::sequencer::next_field;
use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId, Timestamp, UserId};

/// A completed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub uses_budget_app: bool,
    pub budget_app_name: Option<String>,
    pub created_at: Timestamp,
}

impl RegistrationRecord {
    /// Freezes a complete field set into a record.
    ///
    /// # Errors
    ///
    /// `IncompleteRecord` if any applicable field is still unset.
    pub fn from_fields(user_id: UserId, fields: &RegistrationFields) -> Result<Self, DomainError> {
        if let Some(missing) = next_field(fields) {
            return Err(incomplete(missing));
        }

        Ok(Self {
            id: RegistrationId::new(),
            user_id,
            name: fields.name.clone().ok_or_else(|| incomplete(FieldName::Name))?,
            date_of_birth: fields
                .date_of_birth
                .clone()
                .ok_or_else(|| incomplete(FieldName::DateOfBirth))?,
            gender: fields.gender.ok_or_else(|| incomplete(FieldName::Gender))?,
            uses_budget_app: fields
                .uses_budget_app
                .ok_or_else(|| incomplete(FieldName::UsesBudgetApp))?,
            budget_app_name: if fields.uses_budget_app() {
                fields.budget_app_name.clone()
            } else {
                None
            },
            created_at: Timestamp::now(),
        })
    }

    /// The record's values as a field set.
    pub fn fields(&self) -> RegistrationFields {
        RegistrationFields {
            name: Some(self.name.clone()),
            date_of_birth: Some(self.date_of_birth.clone()),
            gender: Some(self.gender),
            uses_budget_app: Some(self.uses_budget_app),
            budget_app_name: self.budget_app_name.clone(),
        }
    }
}

fn incomplete(field: FieldName) -> DomainError {
    DomainError::new(
        ErrorCode::IncompleteRecord,
        format!("Registration is missing '{}'", field),
    )
    .with_detail("field", field.as_str())
}
