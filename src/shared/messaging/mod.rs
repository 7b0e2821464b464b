//! Messaging Module
//!
//! This module contains all the data structures for direct messaging:
//!
//! - `DirectoryUser` - A user from the school directory
//! - `ConversationId` - Canonical key of a two-user conversation
//! - `ChatMessage` - A message in a conversation
//! - `RecentConversation` - An inbox entry
//! - `ContactEntry` - A contact search result
//!
//! # Usage
//!
//! ```rust
//! use classchat::shared::messaging::{ChatMessage, ConversationId, ContactEntry};
//! ```

pub mod user;
pub mod conversation;
pub mod message;
pub mod contact;

// Re-export all types
pub use user::{validate_username, DirectoryUser, Role, RoleFilter};
pub use conversation::{
    Conversation, ConversationId, ListRecentResponse, RecentConversation,
    ResolveConversationRequest, ResolveConversationResponse,
};
pub use message::{
    check_text, ChatMessage, FetchThreadResponse, SendMessageRequest, SendMessageResponse,
    TextCheck, MAX_MESSAGE_CHARS,
};
pub use contact::{ContactEntry, SearchContactsQuery, SearchContactsResponse};
