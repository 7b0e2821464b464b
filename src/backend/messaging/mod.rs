//! Messaging Module
//!
//! Direct messaging between two directory users.
//!
//! - **`resolver`** - canonical conversation identity for a pair of users
//! - **`store`** - append-only message persistence, ordered reads, deletion
//! - **`recent`** - per-user inbox of conversations ordered by last activity
//! - **`search`** - directory contacts merged with existing conversations
//! - **`locks`** - per-conversation write serialization
//! - **`handlers`** - HTTP handlers binding the above
//!
//! The operations are methods on [`MessagingStore`], split across the
//! submodules by concern.

pub mod locks;
pub mod resolver;
pub mod store;
pub mod recent;
pub mod search;
pub mod handlers;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub use locks::ConversationLocks;

/// Source of server timestamps
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Handle to the messaging core
///
/// Cheap to clone; all clones share the pool and the lock table.
#[derive(Clone)]
pub struct MessagingStore {
    pool: SqlitePool,
    locks: ConversationLocks,
    clock: Clock,
}

impl MessagingStore {
    /// Messaging store stamping messages with the wall clock
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(Utc::now))
    }

    /// Messaging store with an explicit time source
    pub fn with_clock(pool: SqlitePool, clock: Clock) -> Self {
        Self {
            pool,
            locks: ConversationLocks::new(),
            clock,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn locks(&self) -> &ConversationLocks {
        &self.locks
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
