//! Convenience result type alias for authsvc.

use crate::error::AppError;

/// A specialized `Result` type for authsvc operations.
pub type AppResult<T> = Result<T, AppError>;
