//! Short code derivation from numeric link identifiers.
//!
//! A short code is the base-36 rendering (`0-9`, `a-z`) of the link's
//! storage-assigned id. The mapping is a pure bijection between `u64` and
//! canonical codes, so uniqueness of codes follows from uniqueness of ids and
//! no collision handling is needed.

/// Radix used for short codes.
pub const CODE_RADIX: u32 = 36;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Longest possible code: `u64::MAX` in base 36.
const MAX_CODE_LEN: usize = 13;

/// Encodes a link id as a lowercase base-36 short code.
///
/// # Examples
///
/// ```
/// use shorts::utils::code_generator::encode_id;
///
/// assert_eq!(encode_id(0), "0");
/// assert_eq!(encode_id(1), "1");
/// assert_eq!(encode_id(35), "z");
/// assert_eq!(encode_id(37), "11");
/// ```
pub fn encode_id(mut id: u64) -> String {
    if id == 0 {
        return "0".to_string();
    }

    let mut buf = [0u8; MAX_CODE_LEN];
    let mut pos = MAX_CODE_LEN;

    while id > 0 {
        pos -= 1;
        buf[pos] = ALPHABET[(id % CODE_RADIX as u64) as usize];
        id /= CODE_RADIX as u64;
    }

    buf[pos..].iter().map(|&b| b as char).collect()
}

/// Decodes a short code back into the link id it was derived from.
///
/// Returns `None` for anything [`encode_id`] could not have produced:
/// empty input, characters outside `0-9a-z`, redundant leading zeros, or
/// values that overflow `u64`.
pub fn decode_code(code: &str) -> Option<u64> {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return None;
    }
    if code.len() > 1 && code.starts_with('0') {
        return None;
    }
    if !code
        .bytes()
        .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
    {
        return None;
    }

    u64::from_str_radix(code, CODE_RADIX).ok()
}

/// Returns true if `code` is the canonical short code of some id.
pub fn is_valid_code(code: &str) -> bool {
    decode_code(code).is_some()
}
