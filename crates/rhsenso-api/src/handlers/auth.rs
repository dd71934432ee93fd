//! Auth handlers: login and me.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use rhsenso_core::error::AppError;
use rhsenso_service::{Identity, LoginResult};

use crate::dto::request::LoginRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    req.validate().map_err(AppError::from)?;

    let remote_user = state
        .auth_service
        .strategy()
        .identity_header()
        .and_then(|name| headers.get(name))
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let result = state
        .auth_service
        .login(&req.into_credentials(remote_user))
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Json<ApiResponse<Identity>> {
    Json(ApiResponse::ok(state.auth_service.me(auth.context())))
}
