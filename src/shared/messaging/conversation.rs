//! Conversation Data Structure
//!
//! A conversation is a direct thread between exactly two users. Its id is the
//! canonical pair key: the two usernames sorted and joined with `:`, so
//! `ConversationId::for_pair(a, b) == ConversationId::for_pair(b, a)`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::ChatMessage;
use super::user::{validate_username, Role};
use crate::shared::error::SharedError;

/// Canonical, order-independent identity of a two-user conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(String);

impl ConversationId {
    /// Joins the two usernames inside a key
    pub const SEPARATOR: char = ':';

    /// Build the key for an unordered pair of distinct usernames
    pub fn for_pair(a: &str, b: &str) -> Result<Self, SharedError> {
        validate_username(a)?;
        validate_username(b)?;
        let (low, high) = match a.cmp(b) {
            std::cmp::Ordering::Less => (a, b),
            std::cmp::Ordering::Greater => (b, a),
            std::cmp::Ordering::Equal => {
                return Err(SharedError::validation(
                    "participants",
                    "a conversation needs two distinct users",
                ))
            }
        };
        Ok(Self(format!("{}{}{}", low, Self::SEPARATOR, high)))
    }

    /// Parse a key received from a client, rejecting non-canonical forms
    pub fn parse(raw: &str) -> Result<Self, SharedError> {
        let (a, b) = raw.split_once(Self::SEPARATOR).ok_or_else(|| {
            SharedError::validation("conversation_id", "missing participant separator")
        })?;
        let id = Self::for_pair(a, b)?;
        if id.0 != raw {
            return Err(SharedError::validation(
                "conversation_id",
                "participants are not in canonical order",
            ));
        }
        Ok(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two participants, lower username first
    pub fn participants(&self) -> (&str, &str) {
        // Construction guarantees the separator is present.
        self.0
            .split_once(Self::SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }

    pub fn has_participant(&self, username: &str) -> bool {
        let (a, b) = self.participants();
        a == username || b == username
    }

    /// The other participant, `None` if `username` is not part of this conversation
    pub fn counterpart(&self, username: &str) -> Option<&str> {
        match self.participants() {
            (a, b) if a == username => Some(b),
            (a, b) if b == username => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConversationId {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}

/// A persisted conversation record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: ConversationId,
    /// Both participants, lower username first
    pub participants: [String; 2],
    pub created_at: DateTime<Utc>,
}

/// One entry of a user's inbox
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentConversation {
    pub conversation_id: ConversationId,
    /// The participant that is not the requesting user
    pub counterpart: String,
    /// Directory role of the counterpart, absent if they left the directory
    pub counterpart_role: Option<Role>,
    pub counterpart_profile_picture_url: Option<String>,
    /// Most recent non-deleted message
    pub last_message: ChatMessage,
}

/// Request to resolve (or lazily start) a conversation with another user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConversationRequest {
    pub other: String,
}

/// Response after resolving a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConversationResponse {
    pub conversation_id: ConversationId,
    pub participants: [String; 2],
    /// Whether the conversation already has visible messages
    pub exists: bool,
}

/// Response for listing recent conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecentResponse {
    pub conversations: Vec<RecentConversation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_symmetric() {
        let ab = ConversationId::for_pair("alice", "bob").unwrap();
        let ba = ConversationId::for_pair("bob", "alice").unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.as_str(), "alice:bob");
    }

    #[test]
    fn test_self_pair_is_rejected() {
        assert!(ConversationId::for_pair("alice", "alice").is_err());
    }

    #[test]
    fn test_parse_rejects_non_canonical_order() {
        assert!(ConversationId::parse("alice:bob").is_ok());
        assert!(ConversationId::parse("bob:alice").is_err());
        assert!(ConversationId::parse("alice").is_err());
        assert!(ConversationId::parse("alice:alice").is_err());
        assert!(ConversationId::parse("a:b:c").is_err());
    }

    #[test]
    fn test_counterpart() {
        let id = ConversationId::for_pair("mr.smith", "jane").unwrap();
        assert_eq!(id.participants(), ("jane", "mr.smith"));
        assert_eq!(id.counterpart("jane"), Some("mr.smith"));
        assert_eq!(id.counterpart("mr.smith"), Some("jane"));
        assert_eq!(id.counterpart("carol"), None);
        assert!(id.has_participant("jane"));
        assert!(!id.has_participant("carol"));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<ConversationId, _> = serde_json::from_str("\"alice:bob\"");
        assert!(ok.is_ok());
        let bad: Result<ConversationId, _> = serde_json::from_str("\"bob:alice\"");
        assert!(bad.is_err());
    }
}
