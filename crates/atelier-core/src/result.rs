//! Convenience result type alias for Atelier.

use crate::error::AppError;

/// A specialized `Result` type for Atelier operations.
pub type AppResult<T> = Result<T, AppError>;
