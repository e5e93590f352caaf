//! Mail Notifications
//!
//! Renders the mail templates and hands them to the configured [`Mailer`].

use serde_json::json;
use std::sync::Arc;

use platform::mail::{MailError, MailMessage, Mailer};
use platform::template::TemplateEngine;

use crate::application::config::{AuthConfig, MailDelivery};
use crate::domain::entity::{pending_registration::PendingRegistration, user::User};
use crate::error::AuthResult;
use crate::templates::{MAIL_ADMIN_NOTIFY, MAIL_OTP, MAIL_WELCOME};

pub const OTP_SUBJECT: &str = "Your Past Papers verification code";
pub const WELCOME_SUBJECT: &str = "Welcome to Past Papers";
pub const ADMIN_NOTIFY_SUBJECT: &str = "New Past Papers registration";

pub struct Notifier<M>
where
    M: Mailer + Sync + 'static,
{
    mailer: Arc<M>,
    templates: Arc<TemplateEngine>,
    config: Arc<AuthConfig>,
}

impl<M> Notifier<M>
where
    M: Mailer + Sync + 'static,
{
    pub fn new(mailer: Arc<M>, templates: Arc<TemplateEngine>, config: Arc<AuthConfig>) -> Self {
        Self {
            mailer,
            templates,
            config,
        }
    }

    /// Email the OTP to the registrant; always awaited
    pub async fn send_otp(&self, pending: &PendingRegistration) -> AuthResult<()> {
        let html = self.templates.render(
            MAIL_OTP,
            &json!({
                "name": pending.name.as_str(),
                "otp": pending.otp.expose(),
                "ttl_minutes": self.config.otp_ttl_minutes(),
            }),
        )?;
        let message = MailMessage::new(pending.email.as_str(), OTP_SUBJECT, html);
        self.mailer.send(&message).await?;

        tracing::info!(email = %pending.email, "OTP mail sent");
        Ok(())
    }

    /// Welcome the new user and tell every admin about them
    pub async fn user_verified(&self, user: &User) -> AuthResult<()> {
        let mut messages = vec![self.welcome(user)?];
        messages.extend(self.admin_notices(user)?);
        self.dispatch(messages).await
    }

    fn welcome(&self, user: &User) -> AuthResult<MailMessage> {
        let html = self.templates.render(
            MAIL_WELCOME,
            &json!({ "name": user.name.as_str() }),
        )?;
        Ok(MailMessage::new(user.email.as_str(), WELCOME_SUBJECT, html))
    }

    fn admin_notices(&self, user: &User) -> AuthResult<Vec<MailMessage>> {
        if self.config.admin_list.is_empty() {
            return Ok(Vec::new());
        }

        let html = self.templates.render(
            MAIL_ADMIN_NOTIFY,
            &json!({
                "name": user.name.as_str(),
                "email": user.email.as_str(),
                "student_id": user.student_id.as_str(),
                "registered_at": user.created_at.to_rfc3339(),
            }),
        )?;

        Ok(self
            .config
            .admin_list
            .iter()
            .map(|admin| MailMessage::new(admin.as_str(), ADMIN_NOTIFY_SUBJECT, html.clone()))
            .collect())
    }

    async fn dispatch(&self, messages: Vec<MailMessage>) -> AuthResult<()> {
        match self.config.mail_delivery {
            MailDelivery::Blocking => {
                send_all(self.mailer.as_ref(), &messages).await?;
            }
            MailDelivery::Background => {
                let mailer = self.mailer.clone();
                tokio::spawn(async move {
                    if let Err(e) = send_all(mailer.as_ref(), &messages).await {
                        tracing::warn!(error = %e, "Background notification failed");
                    }
                });
            }
        }
        Ok(())
    }
}

/// Send every message; the first failure is returned after all were tried
async fn send_all<M: Mailer>(mailer: &M, messages: &[MailMessage]) -> Result<(), MailError> {
    let mut first_error = None;
    for message in messages {
        match mailer.send(message).await {
            Ok(()) => tracing::debug!(to = %message.to, subject = %message.subject, "Mail sent"),
            Err(e) => {
                tracing::warn!(to = %message.to, error = %e, "Mail delivery failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}
