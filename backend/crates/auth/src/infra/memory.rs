//! In-memory Stores
//!
//! The three TTL caches the auth flow keeps in process: unverified
//! registrations, known users and login sessions. Built once at startup and
//! shared through the router state.

use std::sync::Arc;
use std::time::Duration;

use kernel::id::SessionId;
use platform::ttl_cache::TtlCache;
use tokio::task::JoinHandle;

use crate::domain::entity::{auth_session::AuthSession, pending_registration::PendingRegistration};
use crate::domain::value_object::email::Email;

#[derive(Default)]
pub struct AuthCaches {
    /// email -> registration awaiting its OTP
    pub pending: Arc<TtlCache<Email, PendingRegistration>>,
    /// Positive-only "exists in the database" cache
    pub known_users: Arc<TtlCache<Email, ()>>,
    /// session id -> session
    pub sessions: Arc<TtlCache<SessionId, AuthSession>>,
}

impl AuthCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start one sweeper per cache
    pub fn spawn_sweepers(&self, period: Duration) -> CacheSweepers {
        CacheSweepers {
            handles: vec![
                self.pending.spawn_sweeper("pending_registrations", period),
                self.known_users.spawn_sweeper("known_users", period),
                self.sessions.spawn_sweeper("sessions", period),
            ],
        }
    }
}

/// Handles of the running sweepers
pub struct CacheSweepers {
    handles: Vec<JoinHandle<()>>,
}

impl CacheSweepers {
    /// Stop every sweeper
    pub fn shutdown(self) {
        for handle in &self.handles {
            handle.abort();
        }
        tracing::debug!(count = self.handles.len(), "Cache sweepers stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{otp::Otp, student_id::StudentId, user_name::UserName};

    #[tokio::test]
    async fn test_sweepers_purge_expired_entries() {
        let caches = AuthCaches::new();
        let email = Email::new("ada@uni.edu").unwrap();
        caches.known_users.insert(email.clone(), (), Duration::ZERO);
        caches.pending.insert(
            email.clone(),
            PendingRegistration::new(
                email,
                UserName::new("Ada").unwrap(),
                StudentId::new("S1").unwrap(),
                Otp::from_static("abcd1234"),
            ),
            Duration::ZERO,
        );
        assert_eq!(caches.known_users.len(), 1);

        let sweepers = caches.spawn_sweepers(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(caches.known_users.len(), 0);
        assert_eq!(caches.pending.len(), 0);
        sweepers.shutdown();
    }
}
