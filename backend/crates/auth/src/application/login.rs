//! Login Use Case
//!
//! Email-only login for registered users. Existence is answered from the
//! known-users cache first and the database second.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::IssuedSession;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;
use crate::infra::memory::AuthCaches;

/// Login input
pub struct LoginInput {
    pub email: String,
}

/// Login output
#[derive(Debug)]
pub enum LoginOutput {
    /// Known user; session opened
    SignedIn { session_token: String },
    /// Unknown or unusable email; show the registration form
    Unknown,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    caches: Arc<AuthCaches>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, caches: Arc<AuthCaches>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            caches,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let Ok(email) = Email::new(&input.email) else {
            return Ok(LoginOutput::Unknown);
        };

        if !self.user_exists(&email).await? {
            tracing::debug!(email = %email, "Login for unknown email");
            return Ok(LoginOutput::Unknown);
        }

        let session_token =
            IssuedSession::issue(&self.config, email.clone())?.open(&self.caches, &self.config);
        tracing::info!(email = %email, "User logged in");

        Ok(LoginOutput::SignedIn { session_token })
    }

    /// Read-through existence check; only positive answers are cached
    async fn user_exists(&self, email: &Email) -> AuthResult<bool> {
        if self.caches.known_users.contains(email) {
            return Ok(true);
        }

        let exists = self.user_repo.find_by_email(email).await?.is_some();
        if exists {
            self.caches
                .known_users
                .insert(email.clone(), (), self.config.user_cache_ttl);
        }
        Ok(exists)
    }
}
