//! HTTP request handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod chirps;
pub mod health;
pub mod users;
pub mod webhook;
