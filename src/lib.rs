//! classchat - Direct messaging for a school directory
//!
//! One-to-one conversations between teachers and students, backed by SQLite
//! and served over a small JSON API.
//!
//! # Overview
//!
//! - Exactly one conversation per unordered pair of users, created lazily by
//!   the first message
//! - Append-only threads with non-decreasing server timestamps
//! - Sender-only deletion
//! - A recent-conversations inbox and a role-filtered contact search
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between clients and the server
//!   - Conversation ids, messages, directory users, contacts
//!   - Configuration and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and JWT authentication
//!   - Messaging core over SQLite
//!   - User directory adapter and roster import
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use classchat::backend::messaging::MessagingStore;
//!
//! # async fn example(store: MessagingStore) -> Result<(), classchat::backend::BackendError> {
//! let id = store.resolve_conversation("alice", "mr.brown").await?;
//! store.send_message(&id, "alice", "Is the quiz on Friday?", None).await?;
//! let thread = store.fetch_thread(&id).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
