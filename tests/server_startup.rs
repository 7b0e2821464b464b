//! Startup through `create_app`: database, roster import, router

mod common;

use std::io::Write;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use classchat::backend::server::create_app;
use classchat::shared::AppConfig;
use common::{auth_header, generate_test_token, TEST_JWT_SECRET};
use tower::ServiceExt;

const ROSTER: &str = r#"
[[users]]
username = "ms.green"
role = "teacher"

[[users]]
username = "dave"
role = "student"
profile_picture_url = "https://cdn.example/dave.png"
"#;

#[tokio::test]
async fn test_app_serves_roster_users() {
    let mut roster = tempfile::NamedTempFile::new().unwrap();
    roster.write_all(ROSTER.as_bytes()).unwrap();

    let config = AppConfig::builder()
        .database_url("sqlite::memory:")
        .jwt_secret(TEST_JWT_SECRET)
        .roster_path(roster.path())
        .build()
        .unwrap();
    let app = create_app(&config).await.unwrap();

    let request = Request::builder()
        .uri("/api/contacts")
        .header(
            header::AUTHORIZATION,
            auth_header(&generate_test_token("dave")),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["contacts"][0]["username"], "ms.green");
    assert_eq!(body["contacts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_app_rejects_bad_roster() {
    let mut roster = tempfile::NamedTempFile::new().unwrap();
    roster
        .write_all(b"[[users]]\nusername = \"eve\"\nrole = \"janitor\"\n")
        .unwrap();

    let config = AppConfig::builder()
        .database_url("sqlite::memory:")
        .jwt_secret(TEST_JWT_SECRET)
        .roster_path(roster.path())
        .build()
        .unwrap();
    assert!(create_app(&config).await.is_err());
}
