//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - Authenticated messaging endpoints
//!
//! # Route Types
//!
//! ## Public
//!
//! - `GET /health` - Liveness probe
//!
//! ## API Routes
//!
//! - `POST /api/conversations` - Resolve a conversation
//! - `GET /api/conversations` - Recent conversations
//! - `GET|POST /api/conversations/{id}/messages` - Read or append to a thread
//! - `DELETE /api/conversations/{id}/messages/{message_id}` - Delete own message
//! - `GET /api/contacts` - Contact search

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
