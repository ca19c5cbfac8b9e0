//! # chirpy-entity
//!
//! Domain entity models for Chirpy. Every struct in this crate represents
//! a database table row or the data needed to create one. Row types derive
//! `sqlx::FromRow`.

pub mod chirp;
pub mod token;
pub mod user;
