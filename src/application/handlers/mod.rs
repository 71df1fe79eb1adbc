//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod registration;

pub use registration::{
    DialogueSettings, EchoPromptCommand, EchoPromptError, EchoPromptHandler, EchoPromptResult,
    SubmitMessageCommand, SubmitMessageError, SubmitMessageHandler, SubmitMessageResult,
};
