/**
 * Backend Error Types
 *
 * This module defines error types specific to the messaging server.
 * These errors are returned by the resolver, the message store and the
 * HTTP handlers, and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Messaging Errors
 *
 * Rejections of a single request, never retried by the server:
 * - `UnknownUser` - one of the identities is not in the directory
 * - `SelfConversation` - a user tried to open a conversation with themselves
 * - `EmptyMessage` - blank or whitespace-only text
 * - `Forbidden` - the requester is not allowed to touch the resource
 * - `NotFound` - the conversation or message does not exist
 *
 * ## Infrastructure Errors
 *
 * - `DatabaseError` - the store failed; details are logged, not returned
 * - `IoError` - a local file (the roster) could not be read at startup
 * - `HandlerError` - request-level problems with an explicit status
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// Each variant maps to exactly one HTTP status so clients can tell
/// "never existed" (`NotFound`) apart from "not yours" (`Forbidden`).
///
/// # Usage
///
/// ```rust
/// use classchat::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("message 42");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// A username is not known to the directory
    #[error("Unknown user: {username}")]
    UnknownUser {
        /// The username that failed the lookup
        username: String,
    },

    /// Both sides of a conversation are the same user
    #[error("Cannot start a conversation with yourself")]
    SelfConversation,

    /// Message text is empty after trimming
    #[error("Message text is empty")]
    EmptyMessage,

    /// The requester may not perform this operation
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// The addressed conversation or message does not exist
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Handler error (e.g., missing headers, invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Store failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Schema migration failure at startup
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Shared error (validation of client input)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Filesystem failure outside a request, e.g. reading the roster
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn unknown_user(username: impl Into<String>) -> Self {
        Self::UnknownUser {
            username: username.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `UnknownUser`, `NotFound` - 404 Not Found
    /// - `SelfConversation`, `EmptyMessage` - 400 Bad Request
    /// - `Forbidden` - 403 Forbidden
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownUser { .. } => StatusCode::NOT_FOUND,
            Self::SelfConversation => StatusCode::BAD_REQUEST,
            Self::EmptyMessage => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MigrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownUser { .. } => "unknown_user",
            Self::SelfConversation => "self_conversation",
            Self::EmptyMessage => "empty_message",
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::HandlerError { status, .. } if *status == StatusCode::UNAUTHORIZED => "unauthorized",
            Self::HandlerError { status, .. } if *status == StatusCode::NOT_FOUND => "not_found",
            Self::HandlerError { .. } => "bad_request",
            Self::SharedError(SharedError::ValidationError { .. }) => "validation",
            _ => "internal",
        }
    }

    /// Get the error message shown to clients
    ///
    /// Store failures are reported generically; the detail goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::DatabaseError(_) | Self::MigrationError(_) | Self::IoError(_) => {
                "Internal server error".to_string()
            }
            Self::HandlerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
