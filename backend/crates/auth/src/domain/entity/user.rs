//! User Entity
//!
//! A verified registrant. Rows are written once by OTP verification and
//! never updated by this service.

use chrono::{DateTime, Utc};

use crate::domain::entity::pending_registration::PendingRegistration;
use crate::domain::value_object::{email::Email, student_id::StudentId, user_name::UserName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique key
    pub email: Email,
    pub name: UserName,
    pub student_id: StudentId,
    /// Set out-of-band in the database; new users are never admins
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Promote a verified pending registration
    pub fn from_pending(pending: PendingRegistration) -> Self {
        Self {
            email: pending.email,
            name: pending.name,
            student_id: pending.student_id,
            is_admin: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::otp::Otp;

    #[test]
    fn test_from_pending_keeps_profile() {
        let pending = PendingRegistration::new(
            Email::new("ada@uni.edu").unwrap(),
            UserName::new("Ada").unwrap(),
            StudentId::new("S1234").unwrap(),
            Otp::from_static("abcd1234"),
        );
        let user = User::from_pending(pending);
        assert_eq!(user.email.as_str(), "ada@uni.edu");
        assert_eq!(user.name.as_str(), "Ada");
        assert_eq!(user.student_id.as_str(), "S1234");
        assert!(!user.is_admin);
    }
}
