//! Convenience result type alias for RhSenso.

use crate::error::AppError;

/// A specialized `Result` type for RhSenso operations.
pub type AppResult<T> = Result<T, AppError>;
