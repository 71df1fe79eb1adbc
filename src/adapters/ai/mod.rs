//! Text Generator Adapters.
//!
//! Implementations of the TextGenerator port.
//!
//! ## Available Adapters
//!
//! - `OpenAITextGenerator` - OpenAI-compatible chat completions
//! - `MockTextGenerator` - Configurable mock for testing and local runs
//! - `UnconfiguredTextGenerator` - Always fails, so every reply uses templates

mod mock_text_generator;
mod openai_text_generator;
mod unconfigured_text_generator;

pub use mock_text_generator::{MockResponse, MockTextGenerator};
pub use openai_text_generator::{OpenAIConfig, OpenAITextGenerator};
pub use unconfigured_text_generator::UnconfiguredTextGenerator;
