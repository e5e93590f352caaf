//! Auth Session Entity
//!
//! Server-side half of a login. The cookie only carries the signed
//! session id; the email it belongs to lives here.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Open a session for `email` lasting `ttl`
    ///
    /// Fails when the expiry is not representable as a timestamp.
    pub fn new(email: Email, ttl: Duration) -> AuthResult<Self> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal(format!("Session TTL out of range: {ttl}")))?;
        Ok(Self {
            session_id: SessionId::new(),
            email,
            created_at: now,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
