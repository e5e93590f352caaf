//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore, rngs::OsRng};

/// Size of the alphabet sampled by [`random_alphanumeric`] (`A-Z`, `a-z`, `0-9`)
pub const ALPHANUMERIC_ALPHABET_LEN: usize = 62;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a random code of `len` characters, uniform over `[A-Za-z0-9]`
///
/// Drawn from the OS CSPRNG; `Alphanumeric` uses rejection sampling so every
/// character of the alphabet is equally likely.
pub fn random_alphanumeric(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_random_alphanumeric_shape() {
        let code = random_alphanumeric(8);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(random_alphanumeric(0).is_empty());
    }

    #[test]
    fn test_random_alphanumeric_covers_alphabet() {
        // 20k draws over 62 symbols: every symbol shows up with overwhelming probability
        let seen: HashSet<char> = random_alphanumeric(20_000).chars().collect();
        assert_eq!(seen.len(), ALPHANUMERIC_ALPHABET_LEN);
    }

    #[test]
    fn test_base64_known_value() {
        assert_eq!(to_base64(b"hello"), "aGVsbG8=");
        assert_eq!(from_base64("aGVsbG8=").unwrap(), b"hello");
        assert!(from_base64("not base64!").is_err());
    }

    #[test]
    fn test_constant_time_eq() {
        let a = hex::decode("01020304").unwrap();
        let b = hex::decode("01020304").unwrap();
        let c = hex::decode("01020305").unwrap();
        assert!(constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &c));
        assert!(!constant_time_eq(&a, &a[..3]));
    }
}
