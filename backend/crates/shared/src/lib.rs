//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - the unified [`error::app_error::AppError`] and its HTTP mapping
//! - typed identifiers ([`id::SessionId`])
//!
//! Only things whose meaning is stable across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
