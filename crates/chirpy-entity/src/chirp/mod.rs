//! Chirp entities.

pub mod model;

pub use model::{Chirp, CreateChirp};
