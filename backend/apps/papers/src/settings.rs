//! Environment Settings
//!
//! Everything the server reads from the environment (after `.env`).

use anyhow::{Context, bail};
use auth::{AdminList, AuthConfig, MailDelivery, OTP_MIN_LENGTH};
use platform::crypto::from_base64;
use platform::mail::SmtpSettings;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_MAIL_FROM: &str = "Past Papers <no-reply@localhost>";

/// Upper bound for every `*_TTL_SECS` value (ten years)
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 3600;
const MAX_OTP_LENGTH: usize = 64;

pub struct Settings {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub auth: AuthConfig,
    /// `None` selects the log-only mailer
    pub smtp: Option<SmtpSettings>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let listen_addr: SocketAddr = parse_or("LISTEN_ADDR", DEFAULT_LISTEN_ADDR.parse()?)?;

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            session_secret: session_secret()?,
            cookie_secure: parse_or("COOKIE_SECURE", !cfg!(debug_assertions))?,
            cookie_same_site: parse_or("COOKIE_SAME_SITE", defaults.cookie_same_site)?,
            otp_ttl: secs_or("OTP_TTL_SECS", defaults.otp_ttl)?,
            otp_length: check_otp_length(parse_or("OTP_LENGTH", defaults.otp_length)?)?,
            user_cache_ttl: secs_or("USER_CACHE_TTL_SECS", defaults.user_cache_ttl)?,
            session_ttl: secs_or("SESSION_TTL_SECS", defaults.session_ttl)?,
            admin_list: AdminList::parse(&var("ADMIN_MAIL").unwrap_or_default()),
            mail_delivery: match var("MAIL_DELIVERY") {
                Some(raw) => raw.parse::<MailDelivery>().map_err(anyhow::Error::msg)?,
                None => MailDelivery::default(),
            },
            ..defaults
        };

        if auth.admin_list.is_empty() {
            tracing::warn!("ADMIN_MAIL is empty; the admin area is closed to everyone");
        }

        let smtp = match var("SMTP_HOST") {
            Some(host) => Some(SmtpSettings {
                host,
                port: var("SMTP_PORT")
                    .map(|p| p.parse::<u16>())
                    .transpose()
                    .context("SMTP_PORT must be a port number")?,
                username: var("SMTP_USERNAME"),
                password: var("SMTP_PASSWORD"),
                from: var("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
                tls: parse_or("SMTP_TLS", true)?,
            }),
            None => None,
        };

        Ok(Self {
            database_url,
            listen_addr,
            auth,
            smtp,
        })
    }
}

/// Non-empty, trimmed variable
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{name} is invalid ({raw:?}): {e}")),
        None => Ok(default),
    }
}

fn secs_or(name: &str, default: Duration) -> anyhow::Result<Duration> {
    check_ttl(name, parse_or(name, default.as_secs())?)
}

/// TTLs must be positive and small enough to add to a timestamp
fn check_ttl(name: &str, secs: u64) -> anyhow::Result<Duration> {
    if secs == 0 || secs > MAX_TTL_SECS {
        bail!("{name} must be between 1 and {MAX_TTL_SECS} seconds, got {secs}");
    }
    Ok(Duration::from_secs(secs))
}

fn check_otp_length(length: usize) -> anyhow::Result<usize> {
    if !(OTP_MIN_LENGTH..=MAX_OTP_LENGTH).contains(&length) {
        bail!("OTP_LENGTH must be between {OTP_MIN_LENGTH} and {MAX_OTP_LENGTH}, got {length}");
    }
    Ok(length)
}

/// HMAC key for session cookies; random per process in debug builds
fn session_secret() -> anyhow::Result<[u8; 32]> {
    let Some(secret_b64) = var("SESSION_SECRET") else {
        if cfg!(debug_assertions) {
            tracing::warn!("SESSION_SECRET not set, using a random key; sessions end on restart");
            return Ok(AuthConfig::with_random_secret().session_secret);
        }
        bail!("SESSION_SECRET must be set in production");
    };

    decode_secret(&secret_b64)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let secret_bytes = from_base64(secret_b64).context("SESSION_SECRET must be base64")?;
    secret_bytes.try_into().map_err(|b: Vec<u8>| {
        anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", b.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::to_base64;

    #[test]
    fn test_check_ttl_bounds() {
        assert_eq!(check_ttl("SESSION_TTL_SECS", 3600).unwrap(), Duration::from_secs(3600));
        assert!(check_ttl("SESSION_TTL_SECS", MAX_TTL_SECS).is_ok());
        assert!(check_ttl("SESSION_TTL_SECS", 0).is_err());
        let err = check_ttl("SESSION_TTL_SECS", 10_000_000_000_000).unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_SECS"));
    }

    #[test]
    fn test_check_otp_length_bounds() {
        assert_eq!(check_otp_length(8).unwrap(), 8);
        assert!(check_otp_length(OTP_MIN_LENGTH - 1).is_err());
        assert!(check_otp_length(MAX_OTP_LENGTH + 1).is_err());
    }

    #[test]
    fn test_decode_secret() {
        let encoded = to_base64(&[9u8; 32]);
        assert_eq!(decode_secret(&encoded).unwrap(), [9u8; 32]);
    }

    #[test]
    fn test_decode_secret_rejects_wrong_length() {
        let encoded = to_base64(&[9u8; 16]);
        let err = decode_secret(&encoded).unwrap_err();
        assert!(err.to_string().contains("got 16"));
        assert!(decode_secret("not base64!").is_err());
    }
}
