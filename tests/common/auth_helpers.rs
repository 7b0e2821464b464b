//! Authentication test helpers

use classchat::backend::auth::{create_token, DEFAULT_TOKEN_TTL};

/// Secret shared by the test server and the tokens minted here
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Generate a valid bearer token for a directory user
pub fn generate_test_token(username: &str) -> String {
    create_token(username, TEST_JWT_SECRET, DEFAULT_TOKEN_TTL).expect("Failed to generate test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
