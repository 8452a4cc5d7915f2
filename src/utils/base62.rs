//! Base-62 codec for short codes.
//!
//! Short codes are the base-62 representation of the `url` row id, left-padded
//! with `'0'` to [`CODE_WIDTH`] characters. The mapping is positional, so a
//! larger id always yields a larger code under the alphabet's digit order.

/// Digit alphabet: `0-9`, then `a-z`, then `A-Z`.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Nominal width of a short code.
pub const CODE_WIDTH: usize = 6;

/// Width of the `url.short_url` column.
pub const MAX_CODE_LEN: usize = 16;

const BASE: u64 = 62;

/// Encodes `n` in base 62, most significant digit first.
///
/// `encode(0)` is `"0"`; no padding is applied.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    // ALPHABET is ASCII
    String::from_utf8(digits).unwrap_or_default()
}

/// Encodes `n` and left-pads the result with `'0'` to [`CODE_WIDTH`].
///
/// Ids at or above `62^6` produce codes longer than the nominal width; they are
/// returned as-is.
pub fn short_code(n: u64) -> String {
    format!("{:0>width$}", encode(n), width = CODE_WIDTH)
}

/// Decodes a base-62 string.
///
/// Returns `None` for an empty string, for any character outside
/// [`ALPHABET`], or when the value does not fit in a `u64`. Leading `'0'`
/// characters are ordinary zero digits, so padded codes decode to their id.
pub fn decode(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }

    s.bytes().try_fold(0u64, |acc, b| {
        let digit = digit_value(b)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

/// Returns true if `s` could be a stored short code.
pub fn is_valid_code(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_CODE_LEN && s.bytes().all(|b| digit_value(b).is_some())
}

fn digit_value(b: u8) -> Option<u64> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u64),
        b'a'..=b'z' => Some((b - b'a') as u64 + 10),
        b'A'..=b'Z' => Some((b - b'A') as u64 + 36),
        _ => None,
    }
}
