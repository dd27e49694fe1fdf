use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::state::AppState;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/test", get(test_database))
        .route("/health", get(health))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Nautical School Admin Backend Running" }))
}

async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the backend API!" }))
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match state.store.list_collections().await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!("health check failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Reports whether the store answers and which environment keys are set.
/// Always 200; problems are described in the body.
async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let mut report = DiagnosticsReport {
        backend: "✅ Running".to_string(),
        database: "✅ Available".to_string(),
        database_url: set_marker(state.config.database_url_set),
        database_name: set_marker(state.config.database_name.is_some()),
        connection_status: "Connected".to_string(),
        collections: Vec::new(),
    };

    match state.store.list_collections().await {
        Ok(names) => {
            report.collections = names.into_iter().take(MAX_LISTED_COLLECTIONS).collect();
            report.database = "✅ Connected & Working".to_string();
        }
        Err(err) => {
            let cause: String = err.to_string().chars().take(MAX_ERROR_CHARS).collect();
            report.database = format!("⚠️  Connected but Error: {}", cause);
        }
    }

    Json(report)
}

fn set_marker(is_set: bool) -> String {
    let marker = if is_set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}
