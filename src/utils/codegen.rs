//! Short code generation.
//!
//! Codes are fixed-length tokens drawn uniformly from a fixed alphabet of
//! upper/lower letters and digits. No checksum; uniqueness is enforced by
//! the store, with collisions handled by the caller's retry loop.

use rand::Rng;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Alphabet for short codes: `A-Z a-z 0-9`.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random short code of [`CODE_LENGTH`] characters.
///
/// Each position is sampled uniformly from [`ALPHABET`]. The 62^6 code space
/// makes collisions negligible at realistic table sizes, but callers must
/// still treat a duplicate insert as retryable.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
