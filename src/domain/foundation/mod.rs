//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! shared by the registration dialogue.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{RegistrationId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
