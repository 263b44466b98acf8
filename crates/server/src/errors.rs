use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error body returned by every user endpoint: `{"error": "...", "code": n}`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: u16,
}

/// Code used for identities that fail to parse before reaching the service.
pub const INVALID_ID_CODE: u16 = 1000;
/// Code used for request bodies that are not the expected JSON.
pub const INVALID_BODY_CODE: u16 = 1005;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: u16) -> Self {
        Self { status, message: message.into(), code }
    }

    pub fn invalid_id(raw: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, format!("invalid user id: {raw}"), INVALID_ID_CODE)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string(), e.code())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text(), INVALID_BODY_CODE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, error = %self.message, "request failed");
        } else {
            warn!(code = self.code, error = %self.message, "request rejected");
        }
        (self.status, Json(serde_json::json!({"error": self.message, "code": self.code}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from(ServiceError::not_found("user")).status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ServiceError::InvalidName).status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ServiceError::InvalidEmailFormat).status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ServiceError::CorruptData("x".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::from(ServiceError::StorageIo("x".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::invalid_id("nope").code, INVALID_ID_CODE);
    }
}
