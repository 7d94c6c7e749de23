//! API error type and its JSON rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tribunal_auth::AuthError;
use tribunal_core::error::TribunalError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] TribunalError),

    /// Request body could not be read as the expected JSON.
    #[error("{0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Domain(err.into())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Domain(err) => match err {
                TribunalError::Validation { message } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    message.clone(),
                ),
                TribunalError::Unauthorized => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
                }
                TribunalError::Forbidden { .. } => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", err.to_string())
                }
                TribunalError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }
                TribunalError::AlreadyExists { .. } => {
                    (StatusCode::CONFLICT, "ALREADY_EXISTS", err.to_string())
                }
                TribunalError::Conflict { .. } => {
                    (StatusCode::CONFLICT, "CONFLICT", err.to_string())
                }
                TribunalError::IdentityProvider(_)
                | TribunalError::Database(_)
                | TribunalError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (TribunalError::validation("bad"), StatusCode::BAD_REQUEST),
            (TribunalError::Unauthorized, StatusCode::UNAUTHORIZED),
            (TribunalError::forbidden("no"), StatusCode::FORBIDDEN),
            (TribunalError::not_found("cause", "x"), StatusCode::NOT_FOUND),
            (TribunalError::conflict("done"), StatusCode::CONFLICT),
            (
                TribunalError::AlreadyExists {
                    entity: "vehicle".into(),
                    key: "ABCD12".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                TribunalError::Database("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let (_, code, message) = ApiError::from(TribunalError::Database("secret".into())).parts();
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn validation_message_is_passed_through() {
        let (_, _, message) =
            ApiError::from(TribunalError::validation("Description is required")).parts();
        assert_eq!(message, "Description is required");
    }
}
