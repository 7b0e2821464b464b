//! Chat Message Data Structure
//!
//! Messages are append-only. Once stored they are never edited; the only change a
//! message can undergo is deletion by its sender, after which it no longer appears
//! in any read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::conversation::ConversationId;
use crate::shared::error::SharedError;

/// Longest message text accepted, in characters
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation_id: ConversationId,
    pub sender: String,
    pub text: String,
    /// Server-assigned, non-decreasing within a conversation
    pub timestamp: DateTime<Utc>,
    /// Insertion sequence; breaks timestamp ties
    pub sequence: i64,
    /// Client-generated id used to deduplicate retried sends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_message_id: Option<String>,
}

/// Outcome of checking message text before it is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCheck {
    Ok,
    Blank,
    TooLong(usize),
}

/// Classify message text without allocating
pub fn check_text(text: &str) -> TextCheck {
    if text.trim().is_empty() {
        return TextCheck::Blank;
    }
    let chars = text.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return TextCheck::TooLong(chars);
    }
    TextCheck::Ok
}

/// Validate a client message id: short, printable, no surrounding whitespace
pub fn validate_client_message_id(id: &str) -> Result<(), SharedError> {
    if id.is_empty() || id.len() > 128 || id.trim() != id || id.chars().any(char::is_control) {
        return Err(SharedError::validation(
            "client_message_id",
            "must be 1-128 printable characters",
        ));
    }
    Ok(())
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
    #[serde(default)]
    pub client_message_id: Option<String>,
}

/// Response after sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
}

/// Response for reading a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchThreadResponse {
    pub conversation_id: ConversationId,
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_text() {
        assert_eq!(check_text("hi"), TextCheck::Ok);
        assert_eq!(check_text(""), TextCheck::Blank);
        assert_eq!(check_text(" \n\t "), TextCheck::Blank);
        let long = "é".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(check_text(&long), TextCheck::TooLong(MAX_MESSAGE_CHARS + 1));
        assert_eq!(check_text(&"é".repeat(MAX_MESSAGE_CHARS)), TextCheck::Ok);
    }

    #[test]
    fn test_client_message_id_validation() {
        assert!(validate_client_message_id("3f1c-retry").is_ok());
        assert!(validate_client_message_id("").is_err());
        assert!(validate_client_message_id(" padded ").is_err());
        assert!(validate_client_message_id(&"x".repeat(129)).is_err());
    }
}
