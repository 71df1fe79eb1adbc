//! Storage Adapters
//!
//! Implementations of the SessionStore and RecordStore ports.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Process-wide session map
//! - **InMemoryRecordStore** - Records kept in memory (default, testing)
//! - **PostgresRecordStore** - Records inserted into PostgreSQL via sqlx
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryRecordStore, PostgresRecordStore};
//!
//! // Production: PostgreSQL
//! let records = PostgresRecordStore::connect(&url, 5).await?;
//!
//! // Testing: in-memory storage
//! let records = InMemoryRecordStore::new();
//! ```

mod in_memory_record_store;
mod in_memory_session_store;
mod postgres_record_store;

pub use in_memory_record_store::InMemoryRecordStore;
pub use in_memory_session_store::InMemorySessionStore;
pub use postgres_record_store::{is_valid_table_name, PostgresRecordStore};
