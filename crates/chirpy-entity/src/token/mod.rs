//! Refresh token records.

pub mod model;

pub use model::{CreateRefreshToken, RefreshToken, RefreshTokenState};
