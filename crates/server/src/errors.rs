use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::RegistryError;
use tracing::error;

/// Error response rendered as `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.title, detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}

impl From<RegistryError> for JsonApiError {
    fn from(err: RegistryError) -> Self {
        let detail = Some(err.to_string());
        match err {
            RegistryError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "validation_error", detail),
            RegistryError::Conflict(_) => Self::new(StatusCode::CONFLICT, "conflict", detail),
            RegistryError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "not_found", detail),
            RegistryError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, "unauthorized", detail),
            RegistryError::Hash(_) | RegistryError::Store(_) => {
                error!(code = err.code(), error = %err, "request_failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", Some("internal server error".into()))
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_body", Some(rejection.body_text()))
    }
}
