//! Billing webhook handling.

pub mod service;

pub use service::{USER_UPGRADED, WebhookOutcome, WebhookService};
