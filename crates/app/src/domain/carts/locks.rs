//! Per-shopper cart locks.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::auth::UserId;

/// Serializes read-modify-write cycles on one shopper's cart within this process.
///
/// Writers in other processes are not covered; across processes the last
/// write wins.
#[derive(Debug, Clone, Default)]
pub struct CartLocks {
    locks: Arc<DashMap<UserId, Arc<Mutex<()>>>>,
}

/// Held for the duration of one cart mutation.
#[derive(Debug)]
pub struct CartLockGuard {
    user: UserId,
    locks: Arc<DashMap<UserId, Arc<Mutex<()>>>>,
    _guard: OwnedMutexGuard<()>,
}

impl CartLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `user`'s cart.
    pub async fn lock(&self, user: &UserId) -> CartLockGuard {
        let mutex = self
            .locks
            .entry(user.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;

        CartLockGuard {
            user: user.clone(),
            locks: Arc::clone(&self.locks),
            _guard: guard,
        }
    }

    /// Number of shoppers with a lock currently allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for CartLockGuard {
    fn drop(&mut self) {
        // Only the map and this guard hold the mutex: nobody is waiting.
        self.locks
            .remove_if(&self.user, |_, mutex| Arc::strong_count(mutex) <= 2);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::{task, time};

    use super::*;

    #[tokio::test]
    async fn released_locks_are_dropped_from_map() {
        let locks = CartLocks::new();
        let user = UserId::new("1");

        {
            let _guard = locks.lock(&user).await;

            assert_eq!(locks.len(), 1);
        }

        assert!(locks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn same_user_is_serialized() {
        let locks = CartLocks::new();
        let user = UserId::new("1");

        let guard = locks.lock(&user).await;

        let waiter = task::spawn({
            let locks = locks.clone();
            let user = user.clone();

            async move {
                let _guard = locks.lock(&user).await;
            }
        });

        time::sleep(Duration::from_millis(50)).await;

        assert!(!waiter.is_finished(), "second lock should wait");

        drop(guard);

        waiter.await.expect("waiter should complete");
    }

    #[tokio::test]
    async fn different_users_do_not_block() {
        let locks = CartLocks::new();

        let _first = locks.lock(&UserId::new("1")).await;
        let _second = locks.lock(&UserId::new("2")).await;

        assert_eq!(locks.len(), 2);
    }
}
