//! Dialogue lifecycle state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of a registration dialogue.
///
/// - `Collecting`: fields are still being gathered
/// - `Complete`: the record is frozen; no further field mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Collecting,
    Complete,
}

impl DialogueState {
    /// Returns true if incoming messages may still change fields.
    pub fn accepts_field_updates(&self) -> bool {
        matches!(self, Self::Collecting)
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!((self, target), (Collecting, Complete))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Collecting => vec![Complete],
            Complete => vec![],
        }
    }
}
