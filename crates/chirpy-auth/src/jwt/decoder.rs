//! Access token validation.

use std::collections::HashSet;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};

use chirpy_core::config::AuthConfig;
use chirpy_core::traits::Clock;
use chirpy_core::types::UserId;

use super::claims::Claims;
use crate::error::AuthError;

/// Validates HS256 access tokens.
///
/// Checks run in a fixed order: structure, signature, expiry, subject. The
/// first failure wins.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock after the signature.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string(), "sub".to_string()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Decodes and verifies a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        check_structure(token)?;

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature
                }
                _ => AuthError::Malformed,
            }
        })?;

        let claims = data.claims;
        if claims.is_expired_at(self.clock.now()) {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }

    /// Validates a token and returns the identity it was issued for.
    pub fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.decode(token)?;
        claims
            .subject
            .parse::<UserId>()
            .map_err(|_| AuthError::MalformedSubject)
    }
}

/// Rejects anything that is not three segments with a parseable header
/// and a claims payload. Runs before the MAC so a garbled token is
/// `Malformed` whatever its signature.
fn check_structure(token: &str) -> Result<(), AuthError> {
    let mut segments = token.split('.');
    let (Some(_), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::Malformed);
    };

    decode_header(token).map_err(|_| AuthError::Malformed)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::Malformed)?;
    serde_json::from_slice::<Claims>(&payload).map_err(|_| AuthError::Malformed)?;

    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| AuthError::Malformed)?;
    Ok(())
}
