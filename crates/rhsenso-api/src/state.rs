//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use axum::extract::FromRef;

use rhsenso_auth::{AuthStrategy, JwtDecoder, JwtEncoder};
use rhsenso_core::config::AppConfig;
use rhsenso_database::Backend;
use rhsenso_service::AuthService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Configured store
    pub backend: Backend,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Login service
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wire the auth stack for `backend`.
    pub fn new(config: AppConfig, backend: Backend) -> Self {
        let auth_service = AuthService::new(
            AuthStrategy::from_config(&config.auth),
            backend.accounts(),
            JwtEncoder::new(&config.auth),
        );
        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            auth_service: Arc::new(auth_service),
            config: Arc::new(config),
            backend,
        }
    }
}

impl FromRef<AppState> for Arc<JwtDecoder> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.jwt_decoder)
    }
}
