//! Convenience result type alias for Chirpy.

use crate::error::AppError;

/// A specialized `Result` type for Chirpy operations.
pub type AppResult<T> = Result<T, AppError>;
