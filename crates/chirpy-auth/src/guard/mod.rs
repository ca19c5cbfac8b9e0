//! Ownership-based authorization.

pub mod ownership;

pub use ownership::{Decision, OwnershipGuard, Owned};
