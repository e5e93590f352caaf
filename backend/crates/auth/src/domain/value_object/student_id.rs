//! Student ID Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

pub const STUDENT_ID_MAX_LENGTH: usize = 32;

/// Institution-issued student identifier, stored as entered (trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(student_id: impl AsRef<str>) -> AuthResult<Self> {
        let student_id = student_id.as_ref().trim();

        if student_id.is_empty() {
            return Err(AuthError::MissingFields(vec!["studentId"]));
        }
        if student_id.chars().count() > STUDENT_ID_MAX_LENGTH {
            return Err(AuthError::invalid_input(
                "studentId",
                format!("must be at most {STUDENT_ID_MAX_LENGTH} characters"),
            ));
        }
        if student_id
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::invalid_input("studentId", "must not contain spaces"));
        }

        Ok(Self(student_id.to_string()))
    }

    pub fn from_db(student_id: impl Into<String>) -> Self {
        Self(student_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id() {
        assert_eq!(StudentId::new(" S-2024-001 ").unwrap().as_str(), "S-2024-001");
        assert!(matches!(StudentId::new(""), Err(AuthError::MissingFields(_))));
        assert!(StudentId::new("12 34").is_err());
        assert!(StudentId::new("9".repeat(STUDENT_ID_MAX_LENGTH + 1)).is_err());
    }
}
