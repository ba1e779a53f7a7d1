//! Deterministic 32-bit string hash.
//!
//! `hash = hash * 31 + code_unit`, wrapped to the signed 32-bit range.
//! Iterates UTF-16 code units so the value matches hashes computed by the
//! dashboard and the mining tools for the same label.

/// Hash a string to a signed 32-bit integer.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}
