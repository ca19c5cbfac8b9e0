//! Bearer credential extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::warn;

use chirpy_auth::{AuthError, extract_bearer};
use chirpy_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// A caller whose access token validated. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers).map_err(reject)?;
        let user_id = state.jwt_decoder.validate(token).map_err(reject)?;

        Ok(AuthUser(RequestContext::new(user_id, state.clock.now())))
    }
}

/// The raw bearer credential, unvalidated. Used for refresh tokens, which
/// are checked against the store by the handler's service.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_bearer(&parts.headers)
            .map(|token| BearerToken(token.to_string()))
            .map_err(reject)
    }
}

fn reject(err: AuthError) -> ApiError {
    warn!(reason = %err, "Rejected bearer credential");
    err.into()
}
