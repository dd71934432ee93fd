//! Per-request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use rhsenso_core::error::AppError;

use crate::error::ApiError;

/// Abandons the request once `limit` elapses and answers 503 with the
/// standard error envelope. Dropping the inner future cancels any in-flight
/// store call.
pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%method, %path, limit_ms = limit.as_millis() as u64, "Request timed out");
            ApiError(AppError::service_unavailable("Request timed out")).into_response()
        }
    }
}
