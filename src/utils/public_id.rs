//! Externally visible user identifiers.

use rand::Rng;

/// URL-safe alphabet used for public ids.
const PUBLIC_ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of a generated public id (fits the `varchar(31)` column).
pub const PUBLIC_ID_LEN: usize = 21;

/// Generates a random 21-character public id.
///
/// Public ids are what tokens and API responses carry; the numeric surrogate
/// key never leaves the database layer.
pub fn generate_public_id() -> String {
    let mut rng = rand::rng();
    (0..PUBLIC_ID_LEN)
        .map(|_| PUBLIC_ID_ALPHABET[rng.random_range(0..PUBLIC_ID_ALPHABET.len())] as char)
        .collect()
}
