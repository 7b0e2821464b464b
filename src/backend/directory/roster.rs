//! Roster import
//!
//! Seeds the directory from a TOML file exported by the school system:
//!
//! ```toml
//! [[users]]
//! username = "ms.garcia"
//! role = "teacher"
//! profile_picture_url = "https://cdn.example/garcia.png"
//!
//! [[users]]
//! username = "jamal"
//! role = "student"
//! ```

use std::path::Path;

use serde::Deserialize;
use sqlx::SqlitePool;

use super::users::upsert_user;
use crate::backend::error::BackendResult;
use crate::shared::messaging::{validate_username, DirectoryUser};
use crate::shared::SharedError;

#[derive(Debug, Deserialize)]
struct Roster {
    #[serde(default)]
    users: Vec<DirectoryUser>,
}

/// Parse roster text; every username is validated before anything is written
pub fn parse_roster(text: &str) -> BackendResult<Vec<DirectoryUser>> {
    let roster: Roster = toml::from_str(text)
        .map_err(|e| SharedError::validation("roster", e.to_string()))?;
    for user in &roster.users {
        validate_username(&user.username)?;
    }
    Ok(roster.users)
}

/// Import a roster file into the directory, returning how many users were upserted
pub async fn import_roster(pool: &SqlitePool, path: &Path) -> BackendResult<usize> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::error!("Cannot read roster {}: {}", path.display(), e);
        e
    })?;
    let users = parse_roster(&text)?;

    let mut tx = pool.begin().await?;
    for user in &users {
        upsert_user(&mut *tx, user).await?;
    }
    tx.commit().await?;

    tracing::info!("Imported {} users from roster {}", users.len(), path.display());
    Ok(users.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::directory::users::{list_all, lookup};
    use crate::backend::error::BackendError;
    use crate::backend::server::config::open_test_pool;
    use crate::shared::messaging::Role;
    use assert_matches::assert_matches;
    use std::io::Write;

    const ROSTER: &str = r#"
        [[users]]
        username = "ms.garcia"
        role = "teacher"
        profile_picture_url = "https://cdn.example/garcia.png"

        [[users]]
        username = "jamal"
        role = "student"
    "#;

    #[test]
    fn test_parse_roster() {
        let users = parse_roster(ROSTER).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role, Role::Teacher);
        assert!(users[1].profile_picture_url.is_none());
    }

    #[test]
    fn test_parse_roster_rejects_bad_role() {
        let text = "[[users]]\nusername = \"x\"\nrole = \"principal\"\n";
        assert!(parse_roster(text).is_err());
    }

    #[test]
    fn test_parse_roster_rejects_bad_username() {
        let text = "[[users]]\nusername = \"a b\"\nrole = \"student\"\n";
        assert!(parse_roster(text).is_err());
    }

    #[tokio::test]
    async fn test_import_roster_file() {
        let pool = open_test_pool().await;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROSTER.as_bytes()).unwrap();

        let count = import_roster(&pool, file.path()).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(list_all(&pool).await.unwrap().len(), 2);
        assert_eq!(lookup(&pool, "jamal").await.unwrap().unwrap().role, Role::Student);

        // Re-importing is an update, not a duplicate
        import_roster(&pool, file.path()).await.unwrap();
        assert_eq!(list_all(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_missing_roster_is_io_error() {
        let pool = open_test_pool().await;
        let dir = tempfile::tempdir().unwrap();

        let err = import_roster(&pool, &dir.path().join("absent.toml"))
            .await
            .unwrap_err();
        assert_matches!(err, BackendError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound);
        assert!(list_all(&pool).await.unwrap().is_empty());
    }
}
