/**
 * API Route Handlers
 *
 * Messaging endpoints. Every route here sits behind the auth middleware.
 *
 * # Routes
 *
 * ## Conversations
 * - `POST /api/conversations` - Resolve the conversation with another user
 * - `GET /api/conversations` - Recent conversations of the caller
 * - `GET /api/conversations/{conversation_id}/messages` - Read a thread
 * - `POST /api/conversations/{conversation_id}/messages` - Send a message
 * - `DELETE /api/conversations/{conversation_id}/messages/{message_id}` - Delete own message
 *
 * ## Contacts
 * - `GET /api/contacts?q=&role=` - Directory search
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get};
use axum::Router;

use crate::backend::messaging::handlers::{
    delete_message, fetch_thread, list_recent_conversations, resolve_conversation,
    search_contacts, send_message,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
///
/// # Authentication
///
/// All routes require a JWT token in the `Authorization` header. The
/// middleware is a route layer, so unknown paths still fall through to the
/// router's 404 instead of answering 401.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let api: Router<AppState> = Router::new()
        .route(
            "/api/conversations",
            get(list_recent_conversations).post(resolve_conversation),
        )
        .route(
            "/api/conversations/{conversation_id}/messages",
            get(fetch_thread).post(send_message),
        )
        .route(
            "/api/conversations/{conversation_id}/messages/{message_id}",
            delete(delete_message),
        )
        .route("/api/contacts", get(search_contacts))
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    router.merge(api)
}
