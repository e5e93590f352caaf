//! Email Value Object
//!
//! A syntactically valid, lower-cased email address. Ownership is proven
//! separately by the OTP round trip.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Trim, lower-case and validate
    pub fn new(email: impl AsRef<str>) -> AuthResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::MissingFields(vec!["email"]));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::invalid_input(
                "email",
                format!("must be at most {EMAIL_MAX_LENGTH} characters"),
            ));
        }

        if !Self::is_valid_format(&email) {
            return Err(AuthError::invalid_input("email", "invalid format"));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH {
            return false;
        }
        if local.chars().any(|c| c.is_whitespace() || c.is_control() || c == '@') {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
            return false;
        }
        !domain.contains("..")
    }

    /// Rebuild from a stored value (already validated on insert)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@uni.ac.uk").is_ok());
        assert!(Email::new("user+papers@example.com").is_ok());
        assert!(Email::new("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("userexample.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("user@example").is_err());
        assert!(Email::new("user@.example.com").is_err());
        assert!(Email::new("user@example..com").is_err());
        assert!(Email::new("us er@example.com").is_err());
    }

    #[test]
    fn test_empty_email_is_missing() {
        assert!(matches!(Email::new("   "), Err(AuthError::MissingFields(_))));
    }

    #[test]
    fn test_email_normalization() {
        let email = Email::new(" Student@Uni.EDU ").unwrap();
        assert_eq!(email.as_str(), "student@uni.edu");
    }
}
