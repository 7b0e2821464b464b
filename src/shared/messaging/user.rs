//! Directory User Data Structure
//!
//! Users are owned by the school's user directory. The messaging core only reads
//! them: a username is the identity, the role decides which contact filter a user
//! falls under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Longest username accepted by the directory
pub const MAX_USERNAME_LEN: usize = 64;

/// Role of a directory user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(SharedError::validation(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Role restriction used by contact search
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleFilter {
    #[default]
    All,
    Teacher,
    Student,
}

impl RoleFilter {
    /// The single role this filter selects, `None` for `All`
    pub fn role(&self) -> Option<Role> {
        match self {
            RoleFilter::All => None,
            RoleFilter::Teacher => Some(Role::Teacher),
            RoleFilter::Student => Some(Role::Student),
        }
    }
}

/// A user as seen through the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryUser {
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

/// Check that a username is usable as half of a conversation key.
///
/// Usernames are 1 to 64 ASCII letters, digits, `.`, `_` or `-`. The `:` used to
/// join a pair key can therefore never appear inside a username.
pub fn validate_username(username: &str) -> Result<(), SharedError> {
    if username.is_empty() {
        return Err(SharedError::validation("username", "username is empty"));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(SharedError::validation(
            "username",
            format!("username longer than {} characters", MAX_USERNAME_LEN),
        ));
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(SharedError::validation(
            "username",
            format!("invalid character '{}' in '{}'", bad, username),
        ));
    }
    Ok(())
}
