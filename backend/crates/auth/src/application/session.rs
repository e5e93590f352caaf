//! Session issuing shared by login and OTP verification

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::value_object::{email::Email, session_token};
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::AuthCaches;

/// A signed session that is not yet stored
pub(crate) struct IssuedSession {
    session: AuthSession,
    token: String,
}

impl IssuedSession {
    /// Build and sign a session for `email` without touching any store
    pub(crate) fn issue(config: &AuthConfig, email: Email) -> AuthResult<Self> {
        let ttl = chrono::Duration::from_std(config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        let session = AuthSession::new(email, ttl)?;
        let token = session_token::issue(&session.session_id, &config.session_secret)?;
        Ok(Self { session, token })
    }

    /// Store the session and return the signed cookie value
    pub(crate) fn open(self, caches: &AuthCaches, config: &AuthConfig) -> String {
        let Self { session, token } = self;
        tracing::debug!(session_id = %session.session_id, email = %session.email, "Session opened");
        caches
            .sessions
            .insert(session.session_id, session, config.session_ttl);
        token
    }
}
