//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use rhsenso_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiResponse;

const GENERIC_MESSAGE: &str = "An internal error occurred";

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` and use `?` on service calls.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Database | ErrorKind::Internal | ErrorKind::Configuration => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        // Store and internal details stay in the log.
        let message = if err.kind.is_system() {
            tracing::error!(
                code = err.kind.code(),
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
            match err.kind {
                ErrorKind::ServiceUnavailable => "Service temporarily unavailable".to_string(),
                _ => GENERIC_MESSAGE.to_string(),
            }
        } else {
            tracing::debug!(code = err.kind.code(), error = %err.message, "Request rejected");
            err.message
        };

        let body = ApiResponse::<()>::failure(message, err.kind.code(), err.errors);
        (status, Json(body)).into_response()
    }
}
