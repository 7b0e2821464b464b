//! Per-conversation write locks
//!
//! Writes to one conversation (sends, deletes, first-contact creation from
//! either side) are serialized; writes to different conversations never wait
//! on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::shared::messaging::ConversationId;

#[derive(Clone, Default)]
pub struct ConversationLocks {
    locks: Arc<Mutex<HashMap<ConversationId, Arc<AsyncMutex<()>>>>>,
}

impl ConversationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive write access to a conversation
    pub async fn lock(&self, conversation_id: &ConversationId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(conversation_id.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drop entries nobody holds or waits on
    pub fn cleanup_idle(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn id(a: &str, b: &str) -> ConversationId {
        ConversationId::for_pair(a, b).unwrap()
    }

    #[tokio::test]
    async fn test_same_conversation_is_exclusive() {
        let locks = ConversationLocks::new();
        let guard = locks.lock(&id("alice", "bob")).await;

        let other = locks.clone();
        let waiter = tokio::spawn(async move {
            let _guard = other.lock(&id("bob", "alice")).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_conversations_do_not_block() {
        let locks = ConversationLocks::new();
        let _first = locks.lock(&id("alice", "bob")).await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.lock(&id("alice", "carol"))).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_cleanup_keeps_held_locks() {
        let locks = ConversationLocks::new();
        let held = locks.lock(&id("alice", "bob")).await;
        drop(locks.lock(&id("alice", "carol")).await);

        assert_eq!(locks.len(), 2);
        assert_eq!(locks.cleanup_idle(), 1);
        assert_eq!(locks.len(), 1);

        drop(held);
        assert_eq!(locks.cleanup_idle(), 1);
        assert!(locks.is_empty());
    }
}
