mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{FailingStore, app_with, app_with_config, body_json, get, post_json, sqlite_app};
use nautical_admin::config::AppConfig;
use nautical_admin::db::MemoryDocumentStore;
use serde_json::json;

#[tokio::test]
async fn test_root_and_hello_messages() {
    let app = sqlite_app().await;

    let root = body_json(get(app.clone(), "/").await).await;
    assert_eq!(root["message"], "Nautical School Admin Backend Running");

    let hello = body_json(get(app, "/api/hello").await).await;
    assert_eq!(hello["message"], "Hello from the backend API!");
}

#[tokio::test]
async fn test_diagnostics_lists_collections() {
    let app = sqlite_app().await;

    post_json(
        app.clone(),
        "/api/courses",
        &json!({"name": "X", "code": "Y", "price": 1}),
    )
    .await;

    let response = get(app, "/test").await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;

    assert_eq!(report["backend"], "✅ Running");
    assert_eq!(report["database"], "✅ Connected & Working");
    assert_eq!(report["connection_status"], "Connected");
    assert_eq!(report["database_url"], "✅ Set");
    assert_eq!(report["database_name"], "❌ Not Set");
    assert_eq!(report["collections"], json!(["course"]));
}

#[tokio::test]
async fn test_diagnostics_reports_store_errors() {
    let app = app_with(Arc::new(FailingStore));

    let response = get(app.clone(), "/test").await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    let database = report["database"].as_str().expect("database");
    assert!(database.starts_with("⚠️  Connected but Error: Storage unavailable"));
    assert_eq!(report["collections"], json!([]));

    assert_eq!(
        get(app, "/health").await.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_health_ok() {
    let app = sqlite_app().await;
    assert_eq!(get(app, "/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let app = sqlite_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/courses")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_cors_echoes_only_configured_origins() {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let config = AppConfig::from_lookup(|key| match key {
        "CORS_ORIGINS" => Some("https://admin.example.com".to_string()),
        _ => None,
    })
    .expect("config");
    let app = app_with_config(Arc::new(MemoryDocumentStore::new()), config);

    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/courses")
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .expect("request")
    };

    let response = app
        .clone()
        .oneshot(preflight("https://admin.example.com"))
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://admin.example.com")
    );

    let response = app
        .oneshot(preflight("https://elsewhere.example.com"))
        .await
        .expect("response");
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
