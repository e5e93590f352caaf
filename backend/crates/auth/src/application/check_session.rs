//! Check Session Use Case
//!
//! Resolves a session cookie to its server-side session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::value_object::session_token;
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::AuthCaches;

/// Check session use case
pub struct CheckSessionUseCase {
    caches: Arc<AuthCaches>,
    config: Arc<AuthConfig>,
}

impl CheckSessionUseCase {
    pub fn new(caches: Arc<AuthCaches>, config: Arc<AuthConfig>) -> Self {
        Self { caches, config }
    }

    /// Live session for `token`
    pub fn execute(&self, token: &str) -> AuthResult<AuthSession> {
        let session_id = session_token::verify(token, &self.config.session_secret)?;

        let session = self
            .caches
            .sessions
            .get(&session_id)
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.caches.sessions.remove(&session_id);
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }

    /// Live session whose email is on the admin allow-list
    pub fn execute_admin(&self, token: &str) -> AuthResult<AuthSession> {
        let session = self.execute(token)?;
        if !self.config.admin_list.contains(&session.email) {
            tracing::warn!(email = %session.email, "Non-admin denied admin area");
            return Err(AuthError::SessionInvalid);
        }
        Ok(session)
    }
}
