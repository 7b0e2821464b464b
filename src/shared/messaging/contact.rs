//! Contact Data Structure
//!
//! A contact is a directory user as listed in the "start new chat" view, flagged
//! with whether the requester already talks to them.

use serde::{Deserialize, Serialize};

use super::user::{Role, RoleFilter};

/// One row of a contact search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactEntry {
    pub username: String,
    pub role: Role,
    pub profile_picture_url: Option<String>,
    pub has_existing_conversation: bool,
}

/// Query string of a contact search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchContactsQuery {
    /// Case-insensitive substring of the username; empty matches everyone
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub role: RoleFilter,
}

/// Response type for a contact search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchContactsResponse {
    pub contacts: Vec<ContactEntry>,
}
