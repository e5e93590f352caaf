//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use platform::mail::MailError;
use platform::template::TemplateError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message sent to clients for every 5xx; details stay in the logs.
const GENERIC_SERVER_ERROR: &str = "Something went wrong on our side, please try again later";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more required form fields were empty
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field was present but malformed
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// No pending registration for the email (expired or never issued)
    #[error("Invalid or expired OTP")]
    OtpNotFound,

    /// Submitted OTP differs from the issued one
    #[error("Invalid or expired OTP")]
    OtpMismatch,

    /// A user with this email already exists
    #[error("Email is already registered")]
    EmailTaken,

    /// Session cookie missing, forged or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        AuthError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields(_)
            | AuthError::InvalidInput { .. }
            | AuthError::OtpNotFound
            | AuthError::OtpMismatch => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::Database(e) => match classify_sqlx(e) {
                // Only unavailability surfaces. Duplicates arrive as EmailTaken,
                // so any other class here is a server fault.
                ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::InternalServerError,
            },
            AuthError::Mail(_) | AuthError::Template(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError; server-side details never reach the client
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            return AppError::new(kind, GENERIC_SERVER_ERROR);
        }

        let err = AppError::new(kind, self.to_string());
        match self {
            AuthError::OtpNotFound | AuthError::OtpMismatch => {
                err.with_action("Check the code in your email or register again")
            }
            AuthError::SessionInvalid => err.with_action("Please log in again"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Mail(e) => {
                tracing::error!(error = %e, "Auth mail delivery error");
            }
            AuthError::Template(e) => {
                tracing::error!(error = %e, "Auth template error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::OtpMismatch => {
                tracing::warn!("OTP mismatch");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
