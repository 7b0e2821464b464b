//! Database test fixtures
//!
//! Every fixture gets its own in-memory store, so tests never share state.

use classchat::backend::directory::upsert_user;
use classchat::backend::server::config::load_database;
use classchat::shared::messaging::{DirectoryUser, Role};
use classchat::shared::AppConfig;
use sqlx::SqlitePool;

use super::auth_helpers::TEST_JWT_SECRET;

/// The directory every fixture starts with
pub const STUDENTS: [&str; 3] = ["alice", "bob", "carol"];
pub const TEACHERS: [&str; 2] = ["mr.brown", "ms.white"];

/// Configuration for an isolated in-memory store
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url("sqlite::memory:")
        .jwt_secret(TEST_JWT_SECRET)
        .build()
        .expect("Failed to build test config")
}

/// Create a migrated, empty store
pub async fn create_test_pool() -> SqlitePool {
    load_database(&test_config())
        .await
        .expect("Failed to create test database pool")
}

/// Create a migrated store holding the standard directory
pub async fn create_seeded_pool() -> SqlitePool {
    let pool = create_test_pool().await;
    for username in STUDENTS {
        add_user(&pool, username, Role::Student).await;
    }
    for username in TEACHERS {
        add_user(&pool, username, Role::Teacher).await;
    }
    pool
}

pub async fn add_user(pool: &SqlitePool, username: &str, role: Role) {
    upsert_user(
        pool,
        &DirectoryUser {
            username: username.to_string(),
            role,
            profile_picture_url: Some(format!("https://cdn.example/{}.png", username)),
        },
    )
    .await
    .expect("Failed to seed directory user");
}
