//! Pending Registration
//!
//! Registration data held in memory until the emailed OTP is confirmed.
//! Keyed by email, so a second registration for the same address replaces
//! the first.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, otp::Otp, student_id::StudentId, user_name::UserName,
};

#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub email: Email,
    pub name: UserName,
    pub student_id: StudentId,
    pub otp: Otp,
    pub created_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn new(email: Email, name: UserName, student_id: StudentId, otp: Otp) -> Self {
        Self {
            email,
            name,
            student_id,
            otp,
            created_at: Utc::now(),
        }
    }
}
