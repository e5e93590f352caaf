//! User Name Value Object
//!
//! The human name given at registration. Free text: any script is allowed,
//! only surrounding whitespace is trimmed.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Maximum length in characters
pub const USER_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl AsRef<str>) -> AuthResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AuthError::MissingFields(vec!["name"]));
        }
        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AuthError::invalid_input(
                "name",
                format!("must be at most {USER_NAME_MAX_LENGTH} characters"),
            ));
        }
        if name.chars().any(char::is_control) {
            return Err(AuthError::invalid_input("name", "contains control characters"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_trims() {
        assert_eq!(UserName::new("  Ada Lovelace ").unwrap().as_str(), "Ada Lovelace");
        assert_eq!(UserName::new("山田 太郎").unwrap().to_string(), "山田 太郎");
    }

    #[test]
    fn test_user_name_rejects() {
        assert!(matches!(UserName::new(" "), Err(AuthError::MissingFields(_))));
        assert!(UserName::new("a\u{0007}b").is_err());
        assert!(UserName::new("x".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
        assert!(UserName::new("x".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }
}
