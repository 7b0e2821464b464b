//! Message Store
//!
//! Append-only persistence for conversation messages.
//!
//! Every write to a conversation runs under that conversation's lock and inside
//! one transaction, so a message, the conversation record it may create, and the
//! conversation's last-message pointer are always stored together or not at all.
//!
//! Timestamps come from the server clock but never go backwards within a
//! conversation: a message is stamped with the later of "now" and the previous
//! message's timestamp. Ties are broken by insertion sequence.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

use super::MessagingStore;
use crate::backend::directory;
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::error::SharedError;
use crate::shared::messaging::message::validate_client_message_id;
use crate::shared::messaging::{check_text, ChatMessage, ConversationId, TextCheck, MAX_MESSAGE_CHARS};

#[derive(Debug, sqlx::FromRow)]
pub(super) struct MessageRow {
    pub seq: i64,
    pub id: String,
    pub conversation_id: String,
    pub sender: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub client_message_id: Option<String>,
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = BackendError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let conversation_id = ConversationId::parse(&row.conversation_id)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(ChatMessage {
            id,
            conversation_id,
            sender: row.sender,
            text: row.text,
            timestamp: row.sent_at,
            sequence: row.seq,
            client_message_id: row.client_message_id,
        })
    }
}

const MESSAGE_COLUMNS: &str =
    "seq, id, conversation_id, sender, text, sent_at, client_message_id";

impl MessagingStore {
    /// Append a message to a conversation
    ///
    /// The first message creates the conversation record. When `client_message_id`
    /// matches a message this sender already stored in the conversation, that
    /// message is returned and nothing is written. If that message was deleted
    /// in the meantime the send fails with `NotFound`.
    pub async fn send_message(
        &self,
        conversation_id: &ConversationId,
        sender: &str,
        text: &str,
        client_message_id: Option<&str>,
    ) -> BackendResult<ChatMessage> {
        match check_text(text) {
            TextCheck::Ok => {}
            TextCheck::Blank => return Err(BackendError::EmptyMessage),
            TextCheck::TooLong(chars) => {
                return Err(SharedError::validation(
                    "text",
                    format!("{} characters exceeds the limit of {}", chars, MAX_MESSAGE_CHARS),
                )
                .into())
            }
        }
        if let Some(client_id) = client_message_id {
            validate_client_message_id(client_id)?;
        }
        if !conversation_id.has_participant(sender) {
            return Err(BackendError::forbidden(format!(
                "{} is not a participant of {}",
                sender, conversation_id
            )));
        }
        // Directory checks happen before the transaction takes a connection
        let (user_a, user_b) = conversation_id.participants();
        if self.get_conversation(conversation_id).await?.is_none() {
            directory::require(&self.pool, user_a).await?;
            directory::require(&self.pool, user_b).await?;
        }

        let _guard = self.locks.lock(conversation_id).await;
        let mut tx = self.pool.begin().await?;

        let now = self.now();

        // Writing first keeps the transaction from starting as a reader
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO conversations (pair_key, user_a, user_b, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(conversation_id.as_str())
        .bind(user_a)
        .bind(user_b)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if let Some(client_id) = client_message_id {
            if let Some(existing) =
                find_by_client_id(&mut tx, conversation_id, sender, client_id).await?
            {
                tx.commit().await?;
                tracing::debug!(
                    "Duplicate send {} from {} in {}, returning stored message",
                    client_id,
                    sender,
                    conversation_id
                );
                return Ok(existing);
            }
        }

        let previous: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT sent_at FROM messages
            WHERE conversation_id = ?
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .bind(conversation_id.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let timestamp = match previous {
            Some(previous) if previous > now => previous,
            _ => now,
        };

        let id = Uuid::new_v4();
        let result = sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, sender, text, sent_at, client_message_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(conversation_id.as_str())
        .bind(sender)
        .bind(text)
        .bind(timestamp)
        .bind(client_message_id)
        .execute(&mut *tx)
        .await?;
        let sequence = result.last_insert_rowid();

        sqlx::query("UPDATE conversations SET last_message_seq = ? WHERE pair_key = ?")
            .bind(sequence)
            .bind(conversation_id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!("Stored message {} in {} (seq {})", id, conversation_id, sequence);

        Ok(ChatMessage {
            id,
            conversation_id: conversation_id.clone(),
            sender: sender.to_string(),
            text: text.to_string(),
            timestamp,
            sequence,
            client_message_id: client_message_id.map(str::to_string),
        })
    }

    /// All non-deleted messages of a conversation, oldest first
    ///
    /// An id that was never written to yields an empty thread.
    pub async fn fetch_thread(&self, conversation_id: &ConversationId) -> BackendResult<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            SELECT {}
            FROM messages
            WHERE conversation_id = ? AND deleted_at IS NULL
            ORDER BY sent_at ASC, seq ASC
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(conversation_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ChatMessage::try_from).collect()
    }

    /// Delete a message on behalf of `requester`
    ///
    /// Only the sender may delete. The row is kept with a deletion mark and
    /// disappears from every read; the conversation's last-message pointer moves
    /// back to the newest surviving message.
    pub async fn delete_message(
        &self,
        conversation_id: &ConversationId,
        requester: &str,
        message_id: Uuid,
    ) -> BackendResult<()> {
        let _guard = self.locks.lock(conversation_id).await;

        let target: Option<(i64, String, Option<DateTime<Utc>>)> = sqlx::query_as(
            r#"
            SELECT seq, sender, deleted_at FROM messages
            WHERE id = ? AND conversation_id = ?
            "#,
        )
        .bind(message_id.to_string())
        .bind(conversation_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let seq = match target {
            Some((seq, sender, None)) if sender == requester => seq,
            Some((_, _, None)) => {
                return Err(BackendError::forbidden(
                    "only the sender can delete a message",
                ))
            }
            _ => return Err(BackendError::not_found(format!("message {}", message_id))),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE messages SET deleted_at = ? WHERE seq = ?")
            .bind(self.now())
            .bind(seq)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE conversations
            SET last_message_seq = (
                SELECT MAX(seq) FROM messages
                WHERE conversation_id = ? AND deleted_at IS NULL
            )
            WHERE pair_key = ? AND last_message_seq = ?
            "#,
        )
        .bind(conversation_id.as_str())
        .bind(conversation_id.as_str())
        .bind(seq)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("Message {} deleted from {} by {}", message_id, conversation_id, requester);
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientIdMatch {
    #[sqlx(flatten)]
    row: MessageRow,
    deleted: bool,
}

/// Look up an earlier send carrying the same client id
///
/// A match that has since been deleted is `NotFound`: the id stays taken and
/// the retry must not resurrect or duplicate the message.
async fn find_by_client_id(
    tx: &mut Transaction<'_, Sqlite>,
    conversation_id: &ConversationId,
    sender: &str,
    client_message_id: &str,
) -> BackendResult<Option<ChatMessage>> {
    let found = sqlx::query_as::<_, ClientIdMatch>(&format!(
        r#"
        SELECT {}, deleted_at IS NOT NULL AS deleted
        FROM messages
        WHERE conversation_id = ? AND sender = ? AND client_message_id = ?
        "#,
        MESSAGE_COLUMNS
    ))
    .bind(conversation_id.as_str())
    .bind(sender)
    .bind(client_message_id)
    .fetch_optional(&mut **tx)
    .await?;

    match found {
        Some(found) if found.deleted => Err(BackendError::not_found(format!(
            "message with client id {}",
            client_message_id
        ))),
        Some(found) => ChatMessage::try_from(found.row).map(Some),
        None => Ok(None),
    }
}
