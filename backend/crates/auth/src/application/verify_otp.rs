//! Verify OTP Use Case
//!
//! Completes a registration: checks the emailed code, persists the user,
//! logs them in and sends the follow-up mails.

use std::sync::Arc;

use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::notify::Notifier;
use crate::application::session::IssuedSession;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::AuthCaches;

/// Verify OTP input
pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

/// Verify OTP output
pub struct VerifyOtpOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
}

/// Verify OTP use case
pub struct VerifyOtpUseCase<R, M>
where
    R: UserRepository,
    M: Mailer + Sync + 'static,
{
    user_repo: Arc<R>,
    caches: Arc<AuthCaches>,
    notifier: Notifier<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> VerifyOtpUseCase<R, M>
where
    R: UserRepository,
    M: Mailer + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<R>,
        caches: Arc<AuthCaches>,
        notifier: Notifier<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            caches,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyOtpOutput> {
        let missing: Vec<&'static str> = [("email", &input.email), ("otp", &input.otp)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(AuthError::MissingFields(missing));
        }

        let email = Email::new(&input.email)?;

        let pending = self
            .caches
            .pending
            .get(&email)
            .ok_or(AuthError::OtpNotFound)?;

        if !pending.otp.matches(&input.otp) {
            return Err(AuthError::OtpMismatch);
        }

        let user = User::from_pending(pending);
        // Signed up front so the cache updates after the insert cannot fail.
        let session = IssuedSession::issue(&self.config, email.clone())?;

        // The pending entry survives a failed insert so the user can retry.
        self.user_repo.create(&user).await?;

        self.caches.pending.remove(&email);
        self.caches
            .known_users
            .insert(email.clone(), (), self.config.user_cache_ttl);

        let session_token = session.open(&self.caches, &self.config);

        tracing::info!(email = %user.email, "User registered");

        self.notifier.user_verified(&user).await?;

        Ok(VerifyOtpOutput {
            user,
            session_token,
        })
    }
}
