use std::sync::Arc;

use axum::{
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::student::{ConflictPolicy, StudentRepository, StudentService};

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod students;

/// Per-process handler state. The repository is injected; nothing else is shared.
#[derive(Clone)]
pub struct ServerState {
    pub students: StudentService<dyn StudentRepository>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn StudentRepository>, conflict_policy: ConflictPolicy) -> Self {
        Self { students: StudentService::new(repo).with_conflict_policy(conflict_policy) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn handler404(path: Uri) -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("Invalid path: {}", path)))
}

/// Build the full application router: health, OpenAPI document and student CRUD.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let student_routes = Router::new()
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get).put(students::update).delete(students::delete),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(student_routes)
        .fallback(handler404)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
