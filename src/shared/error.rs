//! Shared Error Types
//!
//! This module defines error types that are shared between the server and its clients.
//! These errors represent input problems that can be detected without touching the store.
//!
//! # Error Categories
//!
//! - `ValidationError` - Data validation failures (usernames, message text, ids)
//!
//! # Usage
//!
//! ```rust
//! use classchat::shared::error::SharedError;
//!
//! let error = SharedError::validation("text", "Message is too long");
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides of the API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("username", "Invalid characters");
        let SharedError::ValidationError { field, message } = error;
        assert_eq!(field, "username");
        assert_eq!(message, "Invalid characters");
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("text", "Message is too long");
        let display = format!("{}", error);
        assert!(display.contains("'text'"));
        assert!(display.contains("Message is too long"));
    }
}
