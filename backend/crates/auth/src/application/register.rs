//! Register Use Case
//!
//! Validates the registration form, parks it under a fresh OTP and mails
//! the code.

use std::sync::Arc;

use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::notify::Notifier;
use crate::domain::entity::pending_registration::PendingRegistration;
use crate::domain::value_object::{
    email::Email, otp::Otp, student_id::StudentId, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::AuthCaches;

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub student_id: String,
}

impl RegisterInput {
    /// Names of the fields that are empty after trimming
    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("email", &self.email),
            ("name", &self.name),
            ("studentId", &self.student_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Register output
pub struct RegisterOutput {
    pub email: Email,
    pub name: UserName,
}

/// Register use case
pub struct RegisterUseCase<M>
where
    M: Mailer + Sync + 'static,
{
    caches: Arc<AuthCaches>,
    notifier: Notifier<M>,
    config: Arc<AuthConfig>,
}

impl<M> RegisterUseCase<M>
where
    M: Mailer + Sync + 'static,
{
    pub fn new(caches: Arc<AuthCaches>, notifier: Notifier<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            caches,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(AuthError::MissingFields(missing));
        }

        let email = Email::new(&input.email)?;
        let name = UserName::new(&input.name)?;
        let student_id = StudentId::new(&input.student_id)?;

        let otp = Otp::generate(self.config.otp_length);
        let pending = PendingRegistration::new(email.clone(), name.clone(), student_id, otp);

        // A repeated registration replaces the earlier code.
        self.caches
            .pending
            .insert(email.clone(), pending.clone(), self.config.otp_ttl);

        self.notifier.send_otp(&pending).await?;

        tracing::info!(email = %email, "Registration pending OTP verification");

        Ok(RegisterOutput { email, name })
    }
}
