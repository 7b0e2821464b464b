/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header, checks the subject against the directory, and
 * provides the caller's identity to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::verify_token;
use crate::backend::directory;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::messaging::Role;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: Role,
}

fn unauthorized(message: &str) -> BackendError {
    BackendError::handler(StatusCode::UNAUTHORIZED, message)
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts JWT token from Authorization header
/// 2. Verifies the token
/// 3. Looks the subject up in the directory
/// 4. Attaches user data to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the token is missing or invalid, or names
/// someone the directory does not know.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            unauthorized("Missing Authorization header")
        })?;

    // Extract token (format: "Bearer <token>")
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        unauthorized("Invalid Authorization header format")
    })?;

    let claims = verify_token(token, &app_state.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        unauthorized("Invalid token")
    })?;

    let user = directory::lookup(app_state.pool(), &claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject {} is not in the directory", claims.sub);
            unauthorized("Unknown user")
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        username: user.username,
        role: user.role,
    });

    Ok(next.run(request).await)
}

/// Extract authenticated user from request extensions
///
/// This is a helper function for handlers to get the authenticated user
/// that was set by the auth middleware.
pub fn extract_authenticated_user(parts: &Parts) -> Result<AuthenticatedUser, BackendError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            unauthorized("Not authenticated")
        })
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers to automatically extract
/// the authenticated user from request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_authenticated_user(parts).map(AuthUser)
    }
}
