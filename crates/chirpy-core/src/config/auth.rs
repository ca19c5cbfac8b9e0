//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder secret shipped in defaults. The server warns when it is used.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Value of the `iss` claim on issued access tokens.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,
    /// Default access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Upper bound on a client-requested access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub max_access_token_ttl_seconds: u64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_token_ttl_days: u64,
    /// API key expected from the billing webhook caller.
    #[serde(default)]
    pub polka_key: String,
    /// Password hashing work factor.
    #[serde(default)]
    pub hashing: HashingConfig,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl AuthConfig {
    /// Checks secrets and lifetimes.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_issuer must not be empty"));
        }
        if self.access_token_ttl_seconds == 0 || self.max_access_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth access token lifetimes must be positive",
            ));
        }
        if self.access_token_ttl_seconds > self.max_access_token_ttl_seconds {
            return Err(AppError::configuration(
                "auth.access_token_ttl_seconds exceeds auth.max_access_token_ttl_seconds",
            ));
        }
        if self.refresh_token_ttl_days == 0 {
            return Err(AppError::configuration(
                "auth.refresh_token_ttl_days must be positive",
            ));
        }
        Ok(())
    }

    /// Whether the shipped placeholder secret is still configured.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_issuer(),
            access_token_ttl_seconds: default_access_ttl(),
            max_access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl_days(),
            polka_key: String::new(),
            hashing: HashingConfig::default(),
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_issuer() -> String {
    "chirpy".to_string()
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl_days() -> u64 {
    60
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
