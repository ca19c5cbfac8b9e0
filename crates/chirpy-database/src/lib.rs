//! # chirpy-database
//!
//! PostgreSQL connection management, the repository contracts the rest of
//! Chirpy consumes, and two implementations of each: sqlx-backed for
//! deployments and in-memory for tests and local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{ChirpRepository, RefreshTokenRepository, Repositories, UserRepository};
