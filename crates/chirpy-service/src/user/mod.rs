//! Account registration and credential updates.

pub mod service;

pub use service::UserService;
