//! Record Store Port - Persistence for completed registrations.

use async_trait::async_trait;

use crate::domain::registration::RegistrationRecord;

/// Errors that can occur while persisting a record.
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Failed to serialize record: {0}")]
    Serialization(String),
}

/// Port for inserting completed registration records.
///
/// The dialogue treats any error as fatal to the current request. Inserts
/// are not retried.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one record into `table`.
    ///
    /// # Errors
    ///
    /// Returns `RecordStoreError` if the insert fails.
    async fn insert(&self, table: &str, record: &RegistrationRecord)
        -> Result<(), RecordStoreError>;
}
