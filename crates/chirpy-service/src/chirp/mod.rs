//! Chirp creation, listing and deletion.

pub mod filter;
pub mod service;

pub use filter::{MAX_CHIRP_LENGTH, clean_body};
pub use service::ChirpService;
