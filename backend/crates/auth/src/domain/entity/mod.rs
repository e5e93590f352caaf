pub mod auth_session;
pub mod pending_registration;
pub mod user;
