//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use rhsenso_core::error::{AppError, ErrorKind};

/// Apply pending migrations that create the legacy tables and the
/// account tables.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations");

    let migrator = sqlx::migrate!("../../migrations");
    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!(migrations = migrator.iter().count(), "Database migrations up to date");
    Ok(())
}
