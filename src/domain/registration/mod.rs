//! Registration dialogue domain.
//!
//! Slot-filling over a fixed set of five fields: extraction from free text,
//! step sequencing, question text, and the per-user session lifecycle.

mod extractor;
mod fields;
mod prompts;
mod record;
mod sequencer;
mod session;
mod state;

pub use extractor::FieldExtractor;
pub use fields::{FieldName, FieldUpdates, Gender, RegistrationFields};
pub use prompts::{closing_instruction, fallback_closing_message, prompt_for, rephrase_instruction};
pub use record::RegistrationRecord;
pub use sequencer::{applicable_fields, next_field};
pub use session::Session;
pub use state::DialogueState;
