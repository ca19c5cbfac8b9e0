//! Access token issuance.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use chirpy_core::config::AuthConfig;
use chirpy_core::traits::Clock;
use chirpy_core::types::UserId;

use super::claims::Claims;
use crate::error::AuthError;

/// Signs HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates an encoder from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            clock,
        }
    }

    /// Issues a token for `identity` valid for `ttl` from now.
    pub fn issue(&self, identity: UserId, ttl: Duration) -> Result<String, AuthError> {
        let ttl_seconds = i64::try_from(ttl.as_secs()).map_err(|_| AuthError::InvalidTtl)?;
        if ttl_seconds < 1 {
            return Err(AuthError::InvalidTtl);
        }

        let issued_at = self.clock.now().timestamp();
        let claims = Claims {
            subject: identity.to_string(),
            issuer: self.issuer.clone(),
            issued_at,
            expires_at: issued_at
                .checked_add(ttl_seconds)
                .ok_or(AuthError::InvalidTtl)?,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
