//! Application builder: wires router, middleware and state into an Axum
//! app and serves it until a shutdown signal arrives.

use std::time::Duration;

use axum::Router;
use tracing::{info, warn};

use rhsenso_core::config::AppConfig;
use rhsenso_core::error::AppError;
use rhsenso_database::Backend;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the RhSenso server until SIGINT/SIGTERM, then drains in-flight
/// requests for at most `shutdown_grace_seconds` and closes the store.
pub async fn run_server(config: AppConfig, backend: Backend) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    info!(
        strategy = %config.auth.strategy,
        "Starting RhSenso server"
    );

    let app = build_app(AppState::new(config, backend.clone()));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("RhSenso server listening on {}", addr);

    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    });

    let server = tokio::spawn(async move { server.await });
    let outcome = tokio::select! {
        result = server => result,
        () = async {
            let _ = signalled_rx.await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed; abandoning open requests");
            Ok(Ok(()))
        }
    };

    backend.close().await;
    info!("RhSenso server stopped");

    match outcome {
        Ok(result) => result.map_err(|e| AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
