//! Form DTOs and page view models

use serde::{Deserialize, Serialize};

// ============================================================================
// Forms
// ============================================================================

/// POST /register
///
/// Absent fields deserialize as empty so validation can name them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
}

/// POST /login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
}

/// POST /verify-otp
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyOtpForm {
    pub email: String,
    pub otp: String,
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct EntryPage {
    pub message: Option<String>,
    /// Prefill for the email inputs
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingPage {
    pub email: String,
    pub name: String,
    pub ttl_minutes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifiedPage {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentPage {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminPage {
    pub email: String,
    pub path: String,
}
