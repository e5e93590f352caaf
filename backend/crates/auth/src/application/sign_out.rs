//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::session_token;
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::AuthCaches;

/// Sign out use case
pub struct SignOutUseCase {
    caches: Arc<AuthCaches>,
    config: Arc<AuthConfig>,
}

impl SignOutUseCase {
    pub fn new(caches: Arc<AuthCaches>, config: Arc<AuthConfig>) -> Self {
        Self { caches, config }
    }

    /// Sign out from current session
    pub fn execute(&self, token: &str) -> AuthResult<()> {
        let session_id = session_token::verify(token, &self.config.session_secret)?;
        let session = self
            .caches
            .sessions
            .remove(&session_id)
            .ok_or(AuthError::SessionInvalid)?;

        tracing::info!(session_id = %session_id, email = %session.email, "User signed out");
        Ok(())
    }
}
