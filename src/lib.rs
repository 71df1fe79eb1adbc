//! Registration Dialog - Conversational registration form collector
//!
//! This crate implements a slot-filling dialogue that gathers a user's
//! registration details over several free-text turns, persists the finished
//! record and optionally lets a language model phrase the conversation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
