//! Credential extraction from request headers.

pub mod header;

pub use header::{API_KEY_SCHEME, BEARER_SCHEME, constant_time_eq, extract_api_key, extract_bearer};
