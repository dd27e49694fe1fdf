pub mod diagnostics;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderValue;
use axum::{Router, extract::State, routing::get};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::*;
use crate::schema::RecordKind;
use crate::services;
use crate::state::AppState;

/// The full application: routes plus the CORS and tracing layers.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(diagnostics::routes())
        .route("/api/courses", get(list_courses).post(create_course))
        .route("/api/enrollments", get(list_enrollments).post(create_enrollment))
        .with_state(state)
}

pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = services::list_records(state.store.as_ref(), RecordKind::Course).await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedRecord>, AppError> {
    let Json(payload) = payload?;
    let created = services::create_record(state.store.as_ref(), RecordKind::Course, &payload).await?;
    Ok(Json(created))
}

async fn list_enrollments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let enrollments =
        services::list_records(state.store.as_ref(), RecordKind::Enrollment).await?;
    Ok(Json(enrollments))
}

async fn create_enrollment(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedRecord>, AppError> {
    let Json(payload) = payload?;
    let created =
        services::create_record(state.store.as_ref(), RecordKind::Enrollment, &payload).await?;
    Ok(Json(created))
}
