//! In-process API client
//!
//! Drives the real router with `tower::ServiceExt::oneshot`, no sockets.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use classchat::backend::messaging::MessagingStore;
use classchat::backend::routes::create_router;
use classchat::backend::server::AppState;
use serde_json::Value;
use tower::ServiceExt;

use super::auth_helpers::{auth_header, generate_test_token, TEST_JWT_SECRET};
use super::database::create_seeded_pool;

/// A router over a freshly seeded store, plus direct access to the store
pub struct TestApp {
    pub router: Router,
    pub store: MessagingStore,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_store(MessagingStore::new(create_seeded_pool().await))
    }

    pub fn with_store(store: MessagingStore) -> Self {
        let router = create_router(AppState::new(store.clone(), TEST_JWT_SECRET));
        Self { router, store }
    }

    /// Send a request, authenticated as `user` when given
    ///
    /// Returns the status and the JSON body (`Value::Null` when empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, auth_header(&generate_test_token(user)));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send a prepared request
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, user: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(user), None).await
    }

    pub async fn post(&self, uri: &str, user: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(user), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(user), None).await
    }

    /// Resolve the conversation between `me` and `other`, returning its id
    pub async fn resolve(&self, me: &str, other: &str) -> String {
        let (status, body) = self
            .post("/api/conversations", me, serde_json::json!({ "other": other }))
            .await;
        assert_eq!(status, StatusCode::OK, "resolve failed: {}", body);
        body["conversation_id"].as_str().unwrap().to_string()
    }

    /// Send a message through the API, returning the stored message
    pub async fn send_text(&self, conversation_id: &str, sender: &str, text: &str) -> Value {
        let (status, body) = self
            .post(
                &format!("/api/conversations/{}/messages", conversation_id),
                sender,
                serde_json::json!({ "text": text }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "send failed: {}", body);
        body["message"].clone()
    }
}
