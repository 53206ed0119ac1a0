use sha2::{Digest, Sha224, Sha256, Sha512};

/// Synthetic identifier: the first `len` hex chars of SHA-256(input).
pub fn short_hash(input: &str, len: usize) -> String {
    let mut digest = format!("{:x}", Sha256::digest(input.as_bytes()));
    digest.truncate(len);
    digest
}

/// Hex SHA-512, used where a value independent of `short_hash` is needed.
pub(crate) fn secondary_hash(input: &str) -> String {
    format!("{:x}", Sha512::digest(input.as_bytes()))
}

/// Hex SHA-224, a third independent stream.
pub(crate) fn tertiary_hash(input: &str) -> String {
    format!("{:x}", Sha224::digest(input.as_bytes()))
}

/// Interprets the first four hex digits of a digest as a 16-bit value.
pub(crate) fn leading_u16(hex_digest: &str) -> u16 {
    hex_digest
        .get(..4)
        .and_then(|prefix| u16::from_str_radix(prefix, 16).ok())
        .unwrap_or(0)
}
