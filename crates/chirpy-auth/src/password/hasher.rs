//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString,
        rand_core::{OsRng, RngCore},
    },
};

use chirpy_core::config::HashingConfig;
use chirpy_core::error::AppError;

use crate::error::AuthError;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Hashes and verifies passwords using Argon2id with a configured work
/// factor.
///
/// Both operations are CPU-bound and deliberately slow. Async callers run
/// them on the blocking pool.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a hasher from the configured cost parameters.
    pub fn new(config: &HashingConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid auth.hashing parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a plaintext password with a fresh random salt, returning a
    /// PHC string.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|_| AuthError::HashingInfraFailure)?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|_| AuthError::HashingInfraFailure)?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::HashingInfraFailure)
    }

    /// Verifies a password attempt against a stored PHC string.
    ///
    /// The cost parameters are read from the stored hash, so hashes created
    /// under an older work factor still verify.
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::MalformedHash)?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(argon2::password_hash::Error::Password) => Err(AuthError::PasswordMismatch),
            Err(_) => Err(AuthError::MalformedHash),
        }
    }
}
