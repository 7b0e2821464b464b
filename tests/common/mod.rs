//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - Database fixtures (in-memory store, seeded directory)
//! - Authentication helpers
//! - An in-process client for the HTTP API

#![allow(dead_code)]

pub mod auth_helpers;
pub mod database;
pub mod client;

pub use auth_helpers::*;
pub use client::*;
pub use database::*;
