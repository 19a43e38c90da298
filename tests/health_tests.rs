//! Router-level tests for the health endpoint.
//!
//! Requests are driven through the router with `oneshot`, no socket involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use dockerization::config::{AppConfig, KeyConfig};
use dockerization::key::{KeyError, KeyProvider, StaticKeyProvider};
use dockerization::{create_router, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

/// Returns "key-0", "key-1", ... on successive calls
struct CountingKeyProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl KeyProvider for CountingKeyProvider {
    async fn key(&self) -> Result<String, KeyError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("key-{}", n))
    }
}

struct FailingKeyProvider;

#[async_trait]
impl KeyProvider for FailingKeyProvider {
    async fn key(&self) -> Result<String, KeyError> {
        Err(KeyError::MissingVar("SECRET_PROVIDER_DETAIL".to_string()))
    }
}

fn plain_router() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

fn router_with(provider: Arc<dyn KeyProvider>) -> Router {
    create_router(AppState::new(AppConfig::default()).with_key_provider(provider))
}

async fn send(app: Router, method: Method, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_without_key() {
    let response = send(plain_router(), Method::GET, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert_eq!(body_json(response).await, json!({"status": "up"}));
}

#[tokio::test]
async fn test_health_with_key() {
    let app = router_with(Arc::new(StaticKeyProvider::new("abc123")));
    let response = send(app, Method::GET, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "up", "key": "abc123"})
    );
}

#[tokio::test]
async fn test_health_key_from_config() {
    let config = AppConfig {
        key: KeyConfig::Static {
            value: "from-config".to_string(),
        },
        ..AppConfig::default()
    };
    let response = send(create_router(AppState::new(config)), Method::GET, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "up", "key": "from-config"})
    );
}

#[tokio::test]
async fn test_health_is_idempotent_without_key() {
    let app = plain_router();

    for _ in 0..5 {
        let response = send(app.clone(), Method::GET, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "up"}));
    }
}

#[tokio::test]
async fn test_health_queries_provider_every_request() {
    let app = router_with(Arc::new(CountingKeyProvider {
        calls: AtomicUsize::new(0),
    }));

    for i in 0..3 {
        let response = send(app.clone(), Method::GET, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "up");
        assert_eq!(json["key"], format!("key-{}", i));
    }
}

#[tokio::test]
async fn test_health_provider_failure() {
    let response = send(router_with(Arc::new(FailingKeyProvider)), Method::GET, "/health").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(!text.contains("SECRET_PROVIDER_DETAIL"));

    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json, json!({"detail": "Internal Server Error"}));
}

#[tokio::test]
async fn test_health_head() {
    let response = send(plain_router(), Method::HEAD, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_health_post_not_allowed() {
    let response = send(plain_router(), Method::POST, "/health").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Method Not Allowed"})
    );
}

#[tokio::test]
async fn test_root_not_found() {
    let response = send(plain_router(), Method::GET, "/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let response = send(plain_router(), Method::POST, "/healthz").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_header() {
    let app = plain_router();

    let first = send(app.clone(), Method::GET, "/health").await;
    let second = send(app, Method::GET, "/missing").await;

    let first_id = first.headers()["x-request-id"].to_str().unwrap().to_string();
    let second_id = second.headers()["x-request-id"].to_str().unwrap().to_string();

    assert!(Uuid::parse_str(&first_id).is_ok());
    assert!(Uuid::parse_str(&second_id).is_ok());
    assert_ne!(first_id, second_id);
}
