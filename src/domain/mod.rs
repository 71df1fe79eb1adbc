//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `registration` - Slot-filling dialogue: fields, extraction, sequencing, sessions

pub mod foundation;
pub mod registration;
