//! Development-only maintenance operations.

pub mod service;

pub use service::{AdminService, PurgeReport};
