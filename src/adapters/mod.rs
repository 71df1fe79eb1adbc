//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text generators (OpenAI-compatible, mock, unconfigured)
//! - `storage` - Session and record stores (in-memory, PostgreSQL)
//! - `http` - axum REST surface

pub mod ai;
pub mod http;
pub mod storage;
