//! One-Time Passcode Value Object
//!
//! Fixed-length code drawn uniformly from `[A-Za-z0-9]`. Comparison is
//! constant-time and case-sensitive.

use platform::crypto::{constant_time_eq, random_alphanumeric};
use std::fmt;

/// Shortest code accepted from configuration
pub const OTP_MIN_LENGTH: usize = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct Otp(String);

impl Otp {
    /// Generate a fresh code of `length` characters
    pub fn generate(length: usize) -> Self {
        Self(random_alphanumeric(length.max(OTP_MIN_LENGTH)))
    }

    /// Compare against user input (surrounding whitespace ignored)
    pub fn matches(&self, input: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), input.trim().as_bytes())
    }

    /// Plain code, for the verification email only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Otp(***)")
    }
}

#[cfg(test)]
impl Otp {
    pub(crate) fn from_static(code: &str) -> Self {
        Self(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length_and_alphabet() {
        let otp = Otp::generate(8);
        assert_eq!(otp.expose().len(), 8);
        assert!(otp.expose().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_enforces_minimum() {
        assert_eq!(Otp::generate(1).expose().len(), OTP_MIN_LENGTH);
    }

    #[test]
    fn test_matches() {
        let otp = Otp::from_static("aB3dE6gH");
        assert!(otp.matches("aB3dE6gH"));
        assert!(otp.matches(" aB3dE6gH\n"));
        assert!(!otp.matches("ab3de6gh"));
        assert!(!otp.matches("aB3dE6g"));
        assert!(!otp.matches(""));
    }

    #[test]
    fn test_debug_redacts() {
        let otp = Otp::from_static("secret12");
        assert!(!format!("{otp:?}").contains("secret12"));
    }
}
