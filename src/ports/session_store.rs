//! Session Store Port - Process-wide dialogue state keyed by user.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::registration::Session;

/// Port for loading and saving dialogue sessions.
///
/// Implementations own the sessions. Callers work on copies and write them
/// back with `upsert`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `user_id`, if one exists.
    async fn get(&self, user_id: &UserId) -> Result<Option<Session>, DomainError>;

    /// Inserts or replaces the session for its user.
    async fn upsert(&self, session: &Session) -> Result<(), DomainError>;

    /// Removes sessions last updated strictly before `idle_since`.
    ///
    /// Returns the number of sessions evicted.
    async fn evict_idle(&self, idle_since: Timestamp) -> Result<usize, DomainError>;

    /// Number of sessions currently held.
    async fn len(&self) -> Result<usize, DomainError>;
}
