//! Error conversions
//!
//! Database classification and the HTTP response rendering of [`AppError`].

#[cfg(feature = "sqlx")]
use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error without consuming it
///
/// `RowNotFound` only reaches this point from `fetch_one`; repositories that
/// treat "no rows" as a negative answer use `fetch_optional` instead.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        sqlx::Error::Database(db_err) => {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                // Class 23 — Integrity Constraint Violation
                Some("23505") | Some("23503") | Some("23000") => ErrorKind::Conflict,
                Some("23502") | Some("23514") => ErrorKind::BadRequest,
                // Class 53 — Insufficient Resources, Class 57 — Operator Intervention
                Some(code) if code.starts_with("53") || code.starts_with("57") => {
                    ErrorKind::ServiceUnavailable
                }
                _ => ErrorKind::InternalServerError,
            }
        }
        _ => ErrorKind::InternalServerError,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let kind = classify_sqlx(&err);
        let message = match kind {
            ErrorKind::NotFound => "Record not found",
            ErrorKind::Conflict => "Duplicate or conflicting record",
            ErrorKind::BadRequest => "Constraint violation",
            ErrorKind::ServiceUnavailable => "Database unavailable",
            _ => "Database error",
        };
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
