//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextGenerator` - Language-model phrasing of questions and closing messages
//! - `RecordStore` - Persistence of completed registrations
//! - `SessionStore` - Per-user dialogue state

mod record_store;
mod session_store;
mod text_generator;

pub use record_store::{RecordStore, RecordStoreError};
pub use session_store::SessionStore;
pub use text_generator::{AIError, ProviderInfo, TextGenerator};
