#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use nautical_admin::{
    api,
    config::AppConfig,
    db::{DocumentId, DocumentStore, SqliteDocumentStore, StoredRecord},
    error::StorageError,
    state::AppState,
};
use serde_json::{Map, Value};
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub async fn sqlite_app() -> Router {
    let store = SqliteDocumentStore::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create test store");
    api::app(AppState::new(Arc::new(store), test_config()))
}

pub fn app_with(store: Arc<dyn DocumentStore>) -> Router {
    app_with_config(store, test_config())
}

pub fn app_with_config(store: Arc<dyn DocumentStore>, config: AppConfig) -> Router {
    api::app(AppState::new(store, config))
}

/// A store whose every call fails, as an unreachable database would.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(
        &self,
        _collection: &str,
        _document: Map<String, Value>,
    ) -> Result<DocumentId, StorageError> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }

    async fn find_all(&self, _collection: &str) -> Result<Vec<StoredRecord>, StorageError> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }

    async fn list_collections(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
