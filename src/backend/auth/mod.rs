//! Authentication Module
//!
//! Verifies the bearer tokens that identify callers. Accounts live in the
//! school directory, so there is no signup or password handling here.
//!
//! - **`sessions`** - JWT token generation and validation
//!
//! The request-side check lives in [`crate::backend::middleware::auth`].

/// JWT token generation and validation
pub mod sessions;

pub use sessions::{create_token, verify_token, Claims, DEFAULT_TOKEN_TTL};
