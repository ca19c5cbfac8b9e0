//! `Authorization` header parsing.
//!
//! The scheme word is matched case-sensitively, must be followed by at
//! least one whitespace character, and the credential after it must be a
//! single non-empty token.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::error::AuthError;

/// Scheme for access and refresh tokens.
pub const BEARER_SCHEME: &str = "Bearer";

/// Scheme for the billing webhook caller.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    extract_scheme(headers, BEARER_SCHEME)
}

/// Extracts the key from `Authorization: ApiKey <key>`.
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
    extract_scheme(headers, API_KEY_SCHEME)
}

fn extract_scheme<'h>(headers: &'h HeaderMap, scheme: &str) -> Result<&'h str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;

    if value.as_bytes().iter().all(u8::is_ascii_whitespace) {
        return Err(AuthError::MissingCredential);
    }

    let value = value.to_str().map_err(|_| AuthError::MalformedScheme)?.trim();

    let rest = value
        .strip_prefix(scheme)
        .ok_or(AuthError::MalformedScheme)?;
    if !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
        return Err(AuthError::MalformedScheme);
    }

    let credential = rest.trim();
    if credential.is_empty() || credential.contains(|c: char| c.is_ascii_whitespace()) {
        return Err(AuthError::MalformedScheme);
    }

    Ok(credential)
}

/// Compares two byte strings in time independent of where they differ.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}
