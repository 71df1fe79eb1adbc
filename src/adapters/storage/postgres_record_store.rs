//! PostgreSQL implementation of RecordStore.
//!
//! Expects a table shaped like:
//!
//! ```sql
//! CREATE TABLE registrations (
//!     id              UUID PRIMARY KEY,
//!     user_id         TEXT NOT NULL,
//!     name            TEXT NOT NULL,
//!     date_of_birth   TEXT NOT NULL,
//!     gender          TEXT NOT NULL,
//!     uses_budget_app BOOLEAN NOT NULL,
//!     budget_app_name TEXT,
//!     created_at      TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! Table names come from validated configuration and are interpolated into
//! the statement; values are always bound.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::registration::RegistrationRecord;
use crate::ports::{RecordStore, RecordStoreError};

static TABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid table-name regex"));

/// Returns true if `name` is a plain, unquoted SQL identifier.
pub fn is_valid_table_name(name: &str) -> bool {
    TABLE_NAME.is_match(name)
}

/// PostgreSQL implementation of the RecordStore port.
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new PostgresRecordStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and wraps it.
    ///
    /// # Errors
    ///
    /// `RecordStoreError::Connection` if the database is unreachable.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, RecordStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| RecordStoreError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }
}

fn insert_statement(table: &str) -> Result<String, RecordStoreError> {
    if !is_valid_table_name(table) {
        return Err(RecordStoreError::Query(format!(
            "Invalid table name: {}",
            table
        )));
    }

    Ok(format!(
        r#"
        INSERT INTO {} (
            id, user_id, name, date_of_birth, gender,
            uses_budget_app, budget_app_name, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
        table
    ))
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn insert(
        &self,
        table: &str,
        record: &RegistrationRecord,
    ) -> Result<(), RecordStoreError> {
        let statement = insert_statement(table)?;

        sqlx::query(&statement)
            .bind(*record.id.as_uuid())
            .bind(record.user_id.as_str())
            .bind(&record.name)
            .bind(&record.date_of_birth)
            .bind(record.gender.as_str())
            .bind(record.uses_budget_app)
            .bind(record.budget_app_name.as_deref())
            .bind(*record.created_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| RecordStoreError::Query(format!("Failed to insert registration: {}", e)))?;

        tracing::debug!(table, record_id = %record.id, "Registration inserted");
        Ok(())
    }
}
