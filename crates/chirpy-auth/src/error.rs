//! Credential failure taxonomy.

use chirpy_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Why a credential operation failed.
///
/// Everything except the infrastructure variants is a terminal rejection of
/// the request and is never retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header, or a blank one.
    #[error("missing credential")]
    MissingCredential,
    /// The header does not follow `<Scheme> <credential>`.
    #[error("malformed authorization scheme")]
    MalformedScheme,
    /// The access token cannot be parsed.
    #[error("malformed token")]
    Malformed,
    /// The access token signature does not verify.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,
    /// The token subject is not an account identifier.
    #[error("token subject is not a valid identity")]
    MalformedSubject,
    /// The refresh token was revoked.
    #[error("token has been revoked")]
    Revoked,
    /// No such refresh token.
    #[error("token not found")]
    NotFound,
    /// The caller does not own the resource.
    #[error("caller does not own this resource")]
    OwnershipMismatch,
    /// The password does not match the stored hash.
    #[error("incorrect password")]
    PasswordMismatch,
    /// The stored hash is not a usable PHC string.
    #[error("stored password hash is malformed")]
    MalformedHash,
    /// Requested token lifetime is shorter than one second.
    #[error("token lifetime must be at least one second")]
    InvalidTtl,
    /// The OS entropy source or the hash primitive failed.
    #[error("credential hashing infrastructure failure")]
    HashingInfraFailure,
    /// Token signing failed.
    #[error("failed to sign token: {0}")]
    Signing(String),
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl AuthError {
    /// Whether this is a fault of the server rather than of the caller.
    pub fn is_infrastructure(&self) -> bool {
        match self {
            Self::HashingInfraFailure | Self::Signing(_) => true,
            Self::Store(e) => e.is_server_fault(),
            _ => false,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(inner) => inner,
            AuthError::OwnershipMismatch => AppError::authorization(err.to_string()),
            AuthError::HashingInfraFailure | AuthError::Signing(_) => {
                let message = err.to_string();
                AppError::with_source(ErrorKind::Internal, message, err)
            }
            AuthError::InvalidTtl => AppError::validation(err.to_string()),
            _ => AppError::authentication(err.to_string()),
        }
    }
}
