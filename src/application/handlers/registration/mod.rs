//! Registration dialogue command handlers.

mod echo_prompt;
mod submit_message;
mod user_locks;

pub use echo_prompt::{EchoPromptCommand, EchoPromptError, EchoPromptHandler, EchoPromptResult};
pub use submit_message::{
    DialogueSettings, SubmitMessageCommand, SubmitMessageError, SubmitMessageHandler,
    SubmitMessageResult,
};
