//! # chirpy-service
//!
//! Business logic service layer for Chirpy. Each service orchestrates
//! repositories and the credential components in `chirpy-auth` to
//! implement one group of use cases.
//!
//! Services follow constructor injection. All dependencies are provided
//! at construction time via `Arc` references.

pub mod admin;
pub mod chirp;
pub mod context;
pub mod password;
pub mod session;
pub mod user;
pub mod webhook;

pub use admin::{AdminService, PurgeReport};
pub use chirp::ChirpService;
pub use context::RequestContext;
pub use session::{LoginResult, SessionService};
pub use user::UserService;
pub use webhook::{WebhookOutcome, WebhookService};
