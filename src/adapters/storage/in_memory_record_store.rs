//! In-Memory Record Store Adapter
//!
//! Keeps completed registrations per table. Used by default and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::registration::RegistrationRecord;
use crate::ports::{RecordStore, RecordStoreError};

/// In-memory storage for registration records
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<HashMap<String, Vec<RegistrationRecord>>>>,
}

impl InMemoryRecordStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Records inserted into `table`, oldest first
    pub async fn records(&self, table: &str) -> Vec<RegistrationRecord> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of records across all tables
    pub async fn record_count(&self) -> usize {
        self.tables.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(
        &self,
        table: &str,
        record: &RegistrationRecord,
    ) -> Result<(), RecordStoreError> {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }
}
