//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod login;
pub mod notify;
pub mod register;
pub(crate) mod session;
pub mod sign_out;
pub mod verify_otp;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, MailDelivery};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use notify::Notifier;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use sign_out::SignOutUseCase;
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};
