//! Recent conversations
//!
//! A user's inbox: every conversation they take part in that still has a
//! visible message, newest activity first. The last message is read through the
//! pointer kept on the conversation record, which the store updates in the same
//! transaction as every send and delete.

use super::store::MessageRow;
use super::MessagingStore;
use crate::backend::error::BackendResult;
use crate::shared::messaging::{ChatMessage, RecentConversation, Role};

#[derive(Debug, sqlx::FromRow)]
struct RecentRow {
    counterpart_role: Option<String>,
    counterpart_profile_picture_url: Option<String>,
    #[sqlx(flatten)]
    last_message: MessageRow,
}

impl MessagingStore {
    /// Conversations of `username` ordered by last message, newest first
    ///
    /// Ties on the timestamp are broken by conversation id, ascending.
    /// Conversations whose messages were all deleted are left out.
    pub async fn recent_conversations(&self, username: &str) -> BackendResult<Vec<RecentConversation>> {
        let rows = sqlx::query_as::<_, RecentRow>(
            r#"
            SELECT
                u.role AS counterpart_role,
                u.profile_picture_url AS counterpart_profile_picture_url,
                m.seq, m.id, m.conversation_id, m.sender, m.text, m.sent_at, m.client_message_id
            FROM conversations c
            JOIN messages m ON m.seq = c.last_message_seq
            LEFT JOIN users u
                ON u.username IN (c.user_a, c.user_b) AND u.username <> ?
            WHERE (c.user_a = ? OR c.user_b = ?) AND m.deleted_at IS NULL
            ORDER BY m.sent_at DESC, c.pair_key ASC
            "#,
        )
        .bind(username)
        .bind(username)
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let mut conversations = Vec::with_capacity(rows.len());
        for row in rows {
            let last_message = ChatMessage::try_from(row.last_message)?;
            let counterpart = last_message
                .conversation_id
                .counterpart(username)
                .ok_or_else(|| {
                    sqlx::Error::Decode(
                        format!("{} is not in {}", username, last_message.conversation_id).into(),
                    )
                })?
                .to_string();
            // A role the directory no longer recognises is reported as unknown
            let counterpart_role = row
                .counterpart_role
                .as_deref()
                .and_then(|role| role.parse::<Role>().ok());

            conversations.push(RecentConversation {
                conversation_id: last_message.conversation_id.clone(),
                counterpart,
                counterpart_role,
                counterpart_profile_picture_url: row.counterpart_profile_picture_url,
                last_message,
            });
        }

        Ok(conversations)
    }
}
