//! Per-user turn serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::UserId;

/// Async mutex per user identifier.
///
/// Entries nobody holds or waits on are pruned on the next acquire, so the
/// map only tracks users with a turn in flight.
#[derive(Debug, Default)]
pub(crate) struct UserLocks {
    locks: StdMutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn for `user_id` is running.
    pub(crate) async fn acquire(&self, user_id: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(user_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn same_user_waits_for_release() {
        let locks = Arc::new(UserLocks::new());
        let guard = locks.acquire(&user("u1")).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&user("u1")).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_users_do_not_block() {
        let locks = UserLocks::new();
        let _a = locks.acquire(&user("a")).await;

        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&user("b"))).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn released_entries_are_pruned() {
        let locks = UserLocks::new();
        for id in ["a", "b", "c"] {
            let _guard = locks.acquire(&user(id)).await;
        }

        let _held = locks.acquire(&user("d")).await;
        assert_eq!(locks.tracked(), 1);
    }
}
