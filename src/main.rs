//! RhSenso Server: HR and time-and-attendance REST API.
//!
//! Main entry point that loads configuration, initialises logging, opens the
//! configured store and serves the API.

use tracing_subscriber::{EnvFilter, fmt};

use rhsenso_core::config::AppConfig;
use rhsenso_core::error::AppError;
use rhsenso_database::Backend;

#[tokio::main]
async fn main() {
    let env = std::env::var("RHSENSO_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Open the store and serve until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = ?config.database.provider,
        "Starting RhSenso"
    );

    let backend = Backend::from_config(&config.database).await?;
    rhsenso_api::run_server(config, backend).await
}
