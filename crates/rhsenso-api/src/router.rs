//! Route definitions for the RhSenso HTTP API.
//!
//! All routes are mounted under `/api`. Table resources are registered
//! generically; see [`crate::resources`].

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::resources::legacy_resources;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let resources = legacy_resources(&state);
    build_router_with(state, resources)
}

/// Build the router around an explicit set of resource routes.
pub fn build_router_with(state: AppState, resources: Router<AppState>) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(health_routes())
        .merge(resources);

    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            timeout,
            middleware::timeout::request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::ready))
}
