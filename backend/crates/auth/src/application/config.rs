//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::str::FromStr;
use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::value_object::admin_list::AdminList;

/// How post-verification mails (welcome, admin notices) are delivered
///
/// The OTP mail is always sent inside the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MailDelivery {
    /// Spawned after the response; failures are logged, never retried
    #[default]
    Background,
    /// Awaited in the request; a failure fails the request
    Blocking,
}

impl FromStr for MailDelivery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "background" => Ok(MailDelivery::Background),
            "blocking" => Ok(MailDelivery::Blocking),
            other => Err(format!("unknown mail delivery mode: {other}")),
        }
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Lifetime of a login session
    pub session_ttl: Duration,
    /// Lifetime of an unverified registration
    pub otp_ttl: Duration,
    /// Number of characters in a generated OTP
    pub otp_length: usize,
    /// Lifetime of a positive "user exists" cache entry
    pub user_cache_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Addresses allowed through the admin gate and notified of new users
    pub admin_list: AdminList,
    pub mail_delivery: MailDelivery,
    /// Period of the background cache sweep
    pub cache_sweep_interval: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "papers_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(3600),
            otp_ttl: Duration::from_secs(10 * 60),
            otp_length: 8,
            user_cache_ttl: Duration::from_secs(30 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            admin_list: AdminList::default(),
            mail_delivery: MailDelivery::default(),
            cache_sweep_interval: Duration::from_secs(60),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }

    /// OTP lifetime in whole minutes, for mail copy
    pub fn otp_ttl_minutes(&self) -> u64 {
        self.otp_ttl.as_secs().div_ceil(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.otp_length, 8);
        assert_eq!(config.otp_ttl_minutes(), 10);
        assert_eq!(config.user_cache_ttl.as_secs(), 2_592_000);
        assert_eq!(config.mail_delivery, MailDelivery::Background);
    }

    #[test]
    fn test_development_has_random_secret() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = AuthConfig::default().session_cookie().build_set_cookie("tok");
        assert!(cookie.starts_with("papers_session=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_mail_delivery_from_str() {
        assert_eq!("Blocking".parse::<MailDelivery>(), Ok(MailDelivery::Blocking));
        assert_eq!(" background ".parse::<MailDelivery>(), Ok(MailDelivery::Background));
        assert!("later".parse::<MailDelivery>().is_err());
    }
}
