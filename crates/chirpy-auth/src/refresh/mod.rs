//! Opaque, revocable refresh tokens.

pub mod store;

pub use store::{REFRESH_TOKEN_BYTES, RefreshTokenStore};
