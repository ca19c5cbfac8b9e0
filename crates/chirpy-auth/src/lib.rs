//! # chirpy-auth
//!
//! Credential handling for Chirpy.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: HS256 access token issuance and validation
//! - `refresh`: opaque, revocable refresh tokens backed by a repository
//! - `extract`: `Authorization` header parsing for `Bearer` and `ApiKey`
//! - `guard`: ownership checks before mutating a resource

pub mod error;
pub mod extract;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod refresh;

pub use error::AuthError;
pub use extract::{constant_time_eq, extract_api_key, extract_bearer};
pub use guard::{Decision, OwnershipGuard, Owned};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use refresh::RefreshTokenStore;
