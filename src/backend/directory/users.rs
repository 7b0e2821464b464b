/**
 * Directory Users and Database Operations
 *
 * The user directory belongs to the wider school system; this module is the
 * read side the messaging core needs (`lookup`, `list_by_role`) plus the
 * upsert used by roster imports.
 */

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::backend::error::{BackendError, BackendResult};
use crate::shared::messaging::{validate_username, DirectoryUser, Role};

/// Raw `users` row
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    username: String,
    role: String,
    profile_picture_url: Option<String>,
}

impl TryFrom<UserRow> for DirectoryUser {
    type Error = BackendError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(DirectoryUser {
            role: row.role.parse::<Role>()?,
            username: row.username,
            profile_picture_url: row.profile_picture_url,
        })
    }
}

fn into_users(rows: Vec<UserRow>) -> BackendResult<Vec<DirectoryUser>> {
    rows.into_iter().map(DirectoryUser::try_from).collect()
}

/// Get a user by username
///
/// # Returns
/// The user, or `None` if the directory does not know them
pub async fn lookup(pool: &SqlitePool, username: &str) -> BackendResult<Option<DirectoryUser>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, role, profile_picture_url
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    row.map(DirectoryUser::try_from).transpose()
}

/// Get a user or fail with `UnknownUser`
pub async fn require(pool: &SqlitePool, username: &str) -> BackendResult<DirectoryUser> {
    lookup(pool, username)
        .await?
        .ok_or_else(|| BackendError::unknown_user(username))
}

/// List usernames holding a role, in directory order
pub async fn list_by_role(pool: &SqlitePool, role: Role) -> BackendResult<Vec<DirectoryUser>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, role, profile_picture_url
        FROM users
        WHERE role = ?
        ORDER BY username ASC
        "#,
    )
    .bind(role.as_str())
    .fetch_all(pool)
    .await?;

    into_users(rows)
}

/// List every directory user, in directory order
pub async fn list_all(pool: &SqlitePool) -> BackendResult<Vec<DirectoryUser>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, role, profile_picture_url
        FROM users
        ORDER BY username ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    into_users(rows)
}

/// Insert a user or refresh the profile fields of an existing one
///
/// The username is the identity and is never rewritten. Accepts a pool or an
/// open transaction so roster imports can be applied atomically.
pub async fn upsert_user<'e, E>(executor: E, user: &DirectoryUser) -> BackendResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    validate_username(&user.username)?;
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (username, role, profile_picture_url, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (username) DO UPDATE SET
            role = excluded.role,
            profile_picture_url = excluded.profile_picture_url,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&user.username)
    .bind(user.role.as_str())
    .bind(&user.profile_picture_url)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::open_test_pool;

    fn user(username: &str, role: Role) -> DirectoryUser {
        DirectoryUser {
            username: username.to_string(),
            role,
            profile_picture_url: None,
        }
    }

    #[tokio::test]
    async fn test_lookup_known_and_unknown() {
        let pool = open_test_pool().await;
        upsert_user(&pool, &user("ms.lee", Role::Teacher)).await.unwrap();

        let found = lookup(&pool, "ms.lee").await.unwrap().unwrap();
        assert_eq!(found.role, Role::Teacher);
        assert!(lookup(&pool, "nobody").await.unwrap().is_none());

        let err = require(&pool, "nobody").await.unwrap_err();
        assert!(matches!(err, BackendError::UnknownUser { .. }));
    }

    #[tokio::test]
    async fn test_list_by_role_is_ordered() {
        let pool = open_test_pool().await;
        upsert_user(&pool, &user("zoe", Role::Student)).await.unwrap();
        upsert_user(&pool, &user("adam", Role::Student)).await.unwrap();
        upsert_user(&pool, &user("mr.k", Role::Teacher)).await.unwrap();

        let students: Vec<String> = list_by_role(&pool, Role::Student)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(students, vec!["adam", "zoe"]);
        assert_eq!(list_all(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_upsert_updates_profile() {
        let pool = open_test_pool().await;
        upsert_user(&pool, &user("adam", Role::Student)).await.unwrap();

        let mut updated = user("adam", Role::Student);
        updated.profile_picture_url = Some("https://cdn.example/adam.png".to_string());
        upsert_user(&pool, &updated).await.unwrap();

        let found = lookup(&pool, "adam").await.unwrap().unwrap();
        assert_eq!(found.profile_picture_url.as_deref(), Some("https://cdn.example/adam.png"));
        assert_eq!(list_all(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_rejects_invalid_username() {
        let pool = open_test_pool().await;
        let err = upsert_user(&pool, &user("bad:name", Role::Student)).await.unwrap_err();
        assert!(matches!(err, BackendError::SharedError(_)));
    }
}
