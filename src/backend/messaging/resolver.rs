//! Conversation Resolver
//!
//! Maps an unordered pair of usernames to one conversation identity. The id is
//! derived from the pair itself, so resolving is side-effect free: the
//! conversation record is only written together with its first message
//! (see [`MessagingStore::send_message`]).

use chrono::{DateTime, Utc};

use super::MessagingStore;
use crate::backend::directory;
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::messaging::{Conversation, ConversationId};

#[derive(Debug, sqlx::FromRow)]
struct ConversationRow {
    user_a: String,
    user_b: String,
    created_at: DateTime<Utc>,
}

impl MessagingStore {
    /// Resolve the conversation between two distinct directory users
    ///
    /// Calling this any number of times, from either side, yields the same id.
    pub async fn resolve_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> BackendResult<ConversationId> {
        if user_a == user_b {
            return Err(BackendError::SelfConversation);
        }
        directory::require(&self.pool, user_a).await?;
        directory::require(&self.pool, user_b).await?;

        let id = ConversationId::for_pair(user_a, user_b)?;
        tracing::debug!("Resolved conversation {}", id);
        Ok(id)
    }

    /// Load the persisted record of a conversation, if it has one
    pub async fn get_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> BackendResult<Option<Conversation>> {
        let row = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT user_a, user_b, created_at
            FROM conversations
            WHERE pair_key = ?
            "#,
        )
        .bind(conversation_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Conversation {
            id: conversation_id.clone(),
            participants: [row.user_a, row.user_b],
            created_at: row.created_at,
        }))
    }

    /// Whether the conversation has at least one visible message
    ///
    /// This is what "existing" means to clients: a record whose messages were
    /// all deleted no longer counts, the same as in the inbox.
    pub async fn has_history(&self, conversation_id: &ConversationId) -> BackendResult<bool> {
        let pointer: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT last_message_seq FROM conversations WHERE pair_key = ?")
                .bind(conversation_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(pointer.and_then(|(seq,)| seq).is_some())
    }

    /// Check that an id received from a client addresses a conversation
    ///
    /// A conversation exists once persisted, or prospectively while both of its
    /// participants are directory users. Anything else is `NotFound`.
    pub async fn check_conversation(&self, conversation_id: &ConversationId) -> BackendResult<()> {
        if self.get_conversation(conversation_id).await?.is_some() {
            return Ok(());
        }
        let (a, b) = conversation_id.participants();
        for username in [a, b] {
            if directory::lookup(&self.pool, username).await?.is_none() {
                return Err(BackendError::not_found(format!(
                    "conversation {}",
                    conversation_id
                )));
            }
        }
        Ok(())
    }
}
