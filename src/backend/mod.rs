//! Backend Module
//!
//! Server-side code for classchat: a direct messaging service between the
//! teachers and students of a school directory.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`messaging`** - Conversations, messages, recents and contact search
//! - **`directory`** - Read access to the user directory, roster import
//! - **`auth`** - JWT token verification
//! - **`middleware`** - Request authentication
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── messaging/      - Messaging core and handlers
//! ├── directory/      - User directory adapter
//! ├── auth/           - Session tokens
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Consistency
//!
//! SQLite is the single source of truth. Writes to one conversation are
//! serialized by a per-conversation lock and applied in one transaction;
//! writes to different conversations proceed independently.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Messaging core
pub mod messaging;

/// User directory
pub mod directory;

/// Backend error types
pub mod error;

/// Session tokens
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use messaging::MessagingStore;
pub use server::create_app;
