//! Messaging HTTP Handlers
//!
//! Thin adapters from the JSON API onto [`MessagingStore`]. The caller's
//! identity always comes from the auth middleware, never from the body.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::MessagingStore;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::shared::messaging::{
    ConversationId, FetchThreadResponse, ListRecentResponse, ResolveConversationRequest,
    ResolveConversationResponse, SearchContactsQuery, SearchContactsResponse, SendMessageRequest,
    SendMessageResponse,
};

/// Parse a conversation id from the path; malformed ids address nothing
fn parse_conversation_id(raw: &str) -> BackendResult<ConversationId> {
    ConversationId::parse(raw).map_err(|_| BackendError::not_found(format!("conversation {}", raw)))
}

/// Only participants may read or write a conversation
fn ensure_participant(conversation_id: &ConversationId, username: &str) -> BackendResult<()> {
    if conversation_id.has_participant(username) {
        Ok(())
    } else {
        tracing::warn!("{} tried to access {}", username, conversation_id);
        Err(BackendError::forbidden("not a participant of this conversation"))
    }
}

/// Resolve (or prospectively start) a conversation with another user
pub async fn resolve_conversation(
    State(store): State<MessagingStore>,
    AuthUser(user): AuthUser,
    Json(request): Json<ResolveConversationRequest>,
) -> BackendResult<Json<ResolveConversationResponse>> {
    let conversation_id = store
        .resolve_conversation(&user.username, &request.other)
        .await?;
    let exists = store.has_history(&conversation_id).await?;
    let (a, b) = conversation_id.participants();
    let participants = [a.to_string(), b.to_string()];

    Ok(Json(ResolveConversationResponse {
        conversation_id,
        participants,
        exists,
    }))
}

/// List the caller's conversations, newest activity first
pub async fn list_recent_conversations(
    State(store): State<MessagingStore>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<ListRecentResponse>> {
    let conversations = store.recent_conversations(&user.username).await?;
    Ok(Json(ListRecentResponse { conversations }))
}

/// Read a conversation thread, oldest first
pub async fn fetch_thread(
    State(store): State<MessagingStore>,
    AuthUser(user): AuthUser,
    Path(conversation_id): Path<String>,
) -> BackendResult<Json<FetchThreadResponse>> {
    let conversation_id = parse_conversation_id(&conversation_id)?;
    ensure_participant(&conversation_id, &user.username)?;
    store.check_conversation(&conversation_id).await?;

    let messages = store.fetch_thread(&conversation_id).await?;
    Ok(Json(FetchThreadResponse {
        conversation_id,
        messages,
    }))
}

/// Send a message as the caller
pub async fn send_message(
    State(store): State<MessagingStore>,
    AuthUser(user): AuthUser,
    Path(conversation_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> BackendResult<(StatusCode, Json<SendMessageResponse>)> {
    let conversation_id = parse_conversation_id(&conversation_id)?;
    ensure_participant(&conversation_id, &user.username)?;

    let message = store
        .send_message(
            &conversation_id,
            &user.username,
            &request.text,
            request.client_message_id.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(SendMessageResponse { message })))
}

/// Delete one of the caller's own messages
pub async fn delete_message(
    State(store): State<MessagingStore>,
    AuthUser(user): AuthUser,
    Path((conversation_id, message_id)): Path<(String, String)>,
) -> BackendResult<StatusCode> {
    let conversation_id = parse_conversation_id(&conversation_id)?;
    ensure_participant(&conversation_id, &user.username)?;
    let message_id = Uuid::parse_str(&message_id)
        .map_err(|_| BackendError::not_found(format!("message {}", message_id)))?;

    store
        .delete_message(&conversation_id, &user.username, message_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search the directory for people to message
pub async fn search_contacts(
    State(store): State<MessagingStore>,
    AuthUser(user): AuthUser,
    Query(query): Query<SearchContactsQuery>,
) -> BackendResult<Json<SearchContactsResponse>> {
    let contacts = store
        .search_contacts(&user.username, query.q.as_deref().unwrap_or(""), query.role)
        .await?;
    Ok(Json(SearchContactsResponse { contacts }))
}
