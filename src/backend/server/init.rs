/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, roster import, state creation and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database and run migrations
 * 2. Import the directory roster, if one is configured
 * 3. Create the messaging store and application state
 * 4. Create and configure the router
 * 5. Start the lock cleanup task
 */

use axum::Router;

use crate::backend::directory::import_roster;
use crate::backend::error::BackendResult;
use crate::backend::messaging::{ConversationLocks, MessagingStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// Database, migration and roster failures abort startup: the server has
/// nothing to serve without its store and directory.
pub async fn create_app(config: &AppConfig) -> BackendResult<Router<()>> {
    tracing::info!("Initializing classchat server");

    let pool = load_database(config).await?;

    if let Some(roster) = &config.roster_path {
        import_roster(&pool, roster).await?;
    }

    let messaging = MessagingStore::new(pool);
    let app_state = AppState::new(messaging, config.jwt_secret.as_str());

    let app = create_router(app_state.clone());

    spawn_lock_cleanup(app_state.messaging.locks().clone(), config.lock_cleanup_interval);
    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}

/// Periodically forget conversation locks nobody holds
fn spawn_lock_cleanup(locks: ConversationLocks, every: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = locks.cleanup_idle();
            tracing::debug!("Cleaned up {} idle conversation locks", removed);
        }
    });
}
