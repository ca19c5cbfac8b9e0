//! Custom Axum extractors.

pub mod api_key;
pub mod auth;
pub mod json;
pub mod path;

pub use api_key::WebhookCaller;
pub use auth::{AuthUser, BearerToken};
pub use json::ApiJson;
pub use path::parse_chirp_id;
