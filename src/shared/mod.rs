//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types are the JSON bodies of the
//! messaging API.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All types are designed for serialization
//! and transmission over HTTP.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Messaging types for direct conversations
pub mod messaging;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
