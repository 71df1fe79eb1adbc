//! In-Memory Session Store Adapter
//!
//! Process-wide map from user identifier to dialogue session.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::registration::Session;
use crate::ports::SessionStore;

/// In-memory storage for dialogue sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, Session>>>,
}

impl InMemorySessionStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.user_id().clone(), session.clone());
        Ok(())
    }

    async fn evict_idle(&self, idle_since: Timestamp) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.updated_at().is_before(&idle_since));
        Ok(before - sessions.len())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::FieldName;

    fn session(id: &str) -> Session {
        Session::new(UserId::new(id).unwrap())
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_user() {
        let store = InMemorySessionStore::new();
        let result = store.get(&UserId::new("nobody").unwrap()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        let mut s = session("u1");
        s.prompt_for(FieldName::Gender);

        store.upsert(&s).await.unwrap();
        let loaded = store.get(s.user_id()).await.unwrap().unwrap();

        assert_eq!(loaded, s);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_session() {
        let store = InMemorySessionStore::new();
        let mut s = session("u1");
        store.upsert(&s).await.unwrap();

        s.prompt_for(FieldName::DateOfBirth);
        store.upsert(&s).await.unwrap();

        let loaded = store.get(s.user_id()).await.unwrap().unwrap();
        assert_eq!(loaded.current_step(), FieldName::DateOfBirth);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn evict_idle_removes_only_stale_sessions() {
        let store = InMemorySessionStore::new();
        store.upsert(&session("old")).await.unwrap();
        let cutoff = Timestamp::now().plus_secs(1);

        let evicted = store.evict_idle(cutoff).await.unwrap();
        assert_eq!(evicted, 1);
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn evict_idle_keeps_recent_sessions() {
        let store = InMemorySessionStore::new();
        store.upsert(&session("fresh")).await.unwrap();
        let cutoff = Timestamp::now().minus_secs(60);

        assert_eq!(store.evict_idle(cutoff).await.unwrap(), 0);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemorySessionStore::new();
        let clone = store.clone();

        clone.upsert(&session("u1")).await.unwrap();
        assert_eq!(store.len().await.unwrap(), 1);

        store.clear().await;
        assert_eq!(clone.len().await.unwrap(), 0);
    }
}
