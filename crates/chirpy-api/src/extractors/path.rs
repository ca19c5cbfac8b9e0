//! Typed path parameter helpers.

use chirpy_core::error::AppError;
use chirpy_core::types::ChirpId;

/// Parses a chirp ID from a path segment.
pub fn parse_chirp_id(s: &str) -> Result<ChirpId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid chirp ID: {s}")))
}
