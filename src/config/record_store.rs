//! Record store configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::storage::is_valid_table_name;

/// Where completed registrations are written
#[derive(Debug, Clone, Deserialize)]
pub struct RecordStoreConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: RecordStoreBackend,

    /// PostgreSQL connection URL (postgres backend only)
    pub url: Option<String>,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Table records are inserted into
    #[serde(default = "default_table")]
    pub table: String,
}

/// Record store backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStoreBackend {
    #[default]
    Memory,
    Postgres,
}

impl RecordStoreConfig {
    /// Validate record store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_table_name(&self.table) {
            return Err(ValidationError::InvalidTableName(self.table.clone()));
        }
        if self.backend == RecordStoreBackend::Memory {
            return Ok(());
        }

        let url = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ValidationError::MissingRequired("RECORD_STORE__URL"))?;
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            backend: RecordStoreBackend::default(),
            url: None,
            max_connections: default_max_connections(),
            table: default_table(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_table() -> String {
    "registrations".to_string()
}
