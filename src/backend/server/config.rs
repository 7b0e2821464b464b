/**
 * Server Configuration
 *
 * This module opens the SQLite store backing the directory and the messaging
 * core, and brings its schema up to date.
 *
 * # Connection Settings
 *
 * - WAL journal, `synchronous=NORMAL`, foreign keys on
 * - database file and parent directory created when missing
 * - `sqlite::memory:` stores use a single connection that never expires,
 *   since an in-memory database lives only as long as its connection
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::backend::error::BackendResult;
use crate::shared::AppConfig;

const MAX_CONNECTIONS: u32 = 8;

/// Open the connection pool and run migrations
///
/// Unlike optional integrations, the store is required: a failure here aborts
/// startup.
pub async fn load_database(config: &AppConfig) -> BackendResult<SqlitePool> {
    tracing::info!("Connecting to database...");

    let in_memory = config.is_in_memory();
    let mut options = SqliteConnectOptions::from_str(&config.database_url)?
        .foreign_keys(true);
    if !in_memory {
        ensure_parent_dir(&config.database_url);
        options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Create the directory holding a file-backed database
fn ensure_parent_dir(database_url: &str) {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Could not create database directory {}: {}", parent.display(), e);
            }
        }
    }
}

/// Fresh, migrated in-memory store for unit tests
#[cfg(test)]
pub(crate) async fn open_test_pool() -> SqlitePool {
    let config = AppConfig::builder()
        .database_url("sqlite::memory:")
        .jwt_secret("test-secret")
        .build()
        .expect("test config");
    load_database(&config).await.expect("test database")
}
