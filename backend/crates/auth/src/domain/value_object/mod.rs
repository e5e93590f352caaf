//! Value Object Module

pub mod admin_list;
pub mod email;
pub mod otp;
pub mod session_token;
pub mod student_id;
pub mod user_name;
