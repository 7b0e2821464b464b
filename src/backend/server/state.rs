/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - the messaging store (pool, per-conversation locks, clock)
 * - the secret used to verify bearer tokens
 *
 * Both are cheap to clone, so the whole state is cloned into each handler.
 *
 * # Example
 *
 * ```rust,ignore
 * use classchat::backend::messaging::MessagingStore;
 * use axum::extract::State;
 *
 * async fn handler(State(store): State<MessagingStore>) {
 *     let recent = store.recent_conversations("alice").await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::messaging::MessagingStore;

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Messaging core; owns the database pool
    pub messaging: MessagingStore,

    /// HMAC secret for bearer token verification
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(messaging: MessagingStore, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            messaging,
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.messaging.pool()
    }
}

/// Lets handlers take `State<MessagingStore>` directly
impl FromRef<AppState> for MessagingStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.messaging.clone()
    }
}

/// Lets handlers take `State<SqlitePool>` directly
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.messaging.pool().clone()
    }
}
