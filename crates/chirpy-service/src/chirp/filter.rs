//! Chirp body validation and profanity masking.

use chirpy_core::error::AppError;

/// Maximum body length in characters, after trimming.
pub const MAX_CHIRP_LENGTH: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const MASK: &str = "****";

/// Trims, length-checks and masks a chirp body.
///
/// Masking is per space-separated word and case-insensitive. A word with
/// punctuation attached (`"Sharbert!"`) is left alone.
pub fn clean_body(body: &str) -> Result<String, AppError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(AppError::validation("Chirp must not be empty"));
    }
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(AppError::validation("Chirp is too long"));
    }

    let cleaned = body
        .split(' ')
        .map(|word| {
            if PROFANE_WORDS
                .iter()
                .any(|bad| word.eq_ignore_ascii_case(bad))
            {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(cleaned)
}
