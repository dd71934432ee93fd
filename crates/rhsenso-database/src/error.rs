//! Translation of sqlx failures into the application error taxonomy.

use rhsenso_core::error::{AppError, ErrorKind};

/// Map a sqlx error to an [`AppError`].
///
/// Unique and primary-key violations become [`ErrorKind::Conflict`], with the
/// same messages the service pre-checks produce. Pool and transport failures become
/// [`ErrorKind::ServiceUnavailable`].
pub fn map_sqlx_error(err: sqlx::Error, context: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some(name) if !name.ends_with("_pkey") => {
                    format!("Unique constraint '{name}' violated")
                }
                _ => "Record already exists".to_string(),
            };
            return AppError::with_source(ErrorKind::Conflict, message, err);
        }
    }

    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            AppError::with_source(
                ErrorKind::ServiceUnavailable,
                format!("{context}: database unavailable"),
                err,
            )
        }
        other => AppError::with_source(ErrorKind::Database, context.to_string(), other),
    }
}
