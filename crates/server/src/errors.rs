use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.error, "detail": self.detail}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::BadRequest(_) => Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(e.to_string())),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            // 冲突已在 service 层记录
            ServiceError::Conflict(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Concurrency Conflict", Some(e.to_string()))
            }
            // 存储层原始错误只写日志，不返回给客户端
            ServiceError::Repository(ref msg) => {
                error!(code = e.code(), error = %msg, "student store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(STORE_FAILURE.to_string()))
            }
        }
    }
}

const STORE_FAILURE: &str = "student store unavailable";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found(3), StatusCode::NOT_FOUND),
            (ServiceError::Conflict(3), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Repository("db down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn detail_carries_service_message() {
        let e = JsonApiError::from(ServiceError::not_found(7));
        assert_eq!(e.error, "Not Found");
        assert_eq!(e.detail.as_deref(), Some("not found: student 7 not found"));
    }

    #[test]
    fn store_failure_detail_is_generic() {
        let e = JsonApiError::from(ServiceError::Repository("Execution Error: no such table: students".into()));
        assert_eq!(e.error, "Storage Error");
        assert_eq!(e.detail.as_deref(), Some(STORE_FAILURE));
    }
}
