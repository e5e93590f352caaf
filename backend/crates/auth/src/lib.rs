//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and mail notifications
//! - `infra/` - PostgreSQL repository and in-memory TTL stores
//! - `presentation/` - HTTP handlers, forms, session gates, router
//!
//! ## Flow
//! - Register with email, name and student id; an OTP is mailed
//! - Verifying the OTP stores the user, logs them in and notifies admins
//! - Login by email for known users (cache first, database second)
//! - `/content` needs a session, `/admin` needs an allow-listed session
//!
//! ## Security Model
//! - OTPs come from the OS CSPRNG and are compared in constant time
//! - The session cookie is an HMAC-signed opaque id; the email it maps to
//!   stays on the server

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod templates;


// Re-exports for convenience
pub use application::config::{AuthConfig, MailDelivery};
pub use domain::value_object::{admin_list::AdminList, otp::OTP_MIN_LENGTH};
pub use error::{AuthError, AuthResult};
pub use infra::{AuthCaches, CacheSweepers, PgUserRepository};
pub use presentation::{AuthAppState, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
