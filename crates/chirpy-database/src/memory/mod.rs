//! In-memory repositories for tests and single-process development.

mod chirp;
mod refresh_token;
mod user;

pub use chirp::MemoryChirpRepository;
pub use refresh_token::MemoryRefreshTokenRepository;
pub use user::MemoryUserRepository;
