//! Login, access token renewal and refresh token revocation.

pub mod service;

pub use service::{LoginResult, SessionService};
