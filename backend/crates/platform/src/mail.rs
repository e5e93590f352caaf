//! Outbound Mail
//!
//! A transport-agnostic [`Mailer`] trait with an SMTP implementation backed by
//! `lettre` and a log-only implementation for development.

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// A rendered email ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl MailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid mail address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Mail sending trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver one message; no retries
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::InvalidAddress {
        address: address.to_string(),
        source,
    })
}

/// Build the MIME message for `message`, sent from `from`
pub fn build_message(from: &Mailbox, message: &MailMessage) -> Result<Message, MailError> {
    let email = Message::builder()
        .from(from.clone())
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())?;
    Ok(email)
}

// ============================================================================
// SMTP
// ============================================================================

/// SMTP relay settings
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender mailbox, e.g. `Past Papers <no-reply@example.com>`
    pub from: String,
    /// `false` only for local relays such as MailHog
    pub tls: bool,
}

/// SMTP mailer over an async `lettre` transport
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let from = parse_mailbox(&settings.from)?;

        let mut builder = if settings.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        if let Some(port) = settings.port {
            builder = builder.port(port);
        }

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let email = build_message(&self.from, message)?;
        self.transport.send(email).await?;

        tracing::info!(to = %message.to, subject = %message.subject, "Mail sent");
        Ok(())
    }
}

// ============================================================================
// Log-only
// ============================================================================

/// Writes messages to the log instead of sending them
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        parse_mailbox(&message.to)?;

        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.html_body,
            "Mail not sent (log transport)"
        );
        Ok(())
    }
}

/// Transport selected at startup
#[derive(Clone)]
pub enum MailTransport {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl MailTransport {
    pub fn kind(&self) -> &'static str {
        match self {
            MailTransport::Smtp(_) => "smtp",
            MailTransport::Log(_) => "log",
        }
    }
}

impl Mailer for MailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        match self {
            MailTransport::Smtp(mailer) => Mailer::send(mailer, message).await,
            MailTransport::Log(mailer) => Mailer::send(mailer, message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Mailbox {
        "Past Papers <no-reply@example.com>".parse().unwrap()
    }

    #[test]
    fn test_build_message_headers() {
        let msg = MailMessage::new("student@example.com", "OTP Verification", "<p>abc</p>");
        let email = build_message(&sender(), &msg).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("To: student@example.com"));
        assert!(raw.contains("Subject: OTP Verification"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let msg = MailMessage::new("not-an-address", "s", "b");
        let err = build_message(&sender(), &msg).unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress { .. }));
    }

    #[test]
    fn test_smtp_mailer_rejects_bad_sender() {
        let settings = SmtpSettings {
            host: "localhost".to_string(),
            port: Some(1025),
            username: None,
            password: None,
            from: "nobody".to_string(),
            tls: false,
        };
        assert!(matches!(
            SmtpMailer::new(&settings),
            Err(MailError::InvalidAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_log_transport_sends() {
        let transport = MailTransport::Log(LogMailer);
        assert_eq!(transport.kind(), "log");

        let msg = MailMessage::new("student@example.com", "Hello", "<p>hi</p>");
        assert!(Mailer::send(&transport, &msg).await.is_ok());

        let bad = MailMessage::new("broken", "Hello", "<p>hi</p>");
        assert!(Mailer::send(&transport, &bad).await.is_err());
    }
}
