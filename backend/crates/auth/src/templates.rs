//! Embedded Templates
//!
//! Page and mail templates compiled into the binary.

use platform::template::{TemplateEngine, TemplateError};

pub const ENTRY: &str = "entry";
pub const PENDING: &str = "pending";
pub const VERIFIED: &str = "verified";
pub const CONTENT: &str = "content";
pub const ADMIN: &str = "admin";
pub const MAIL_OTP: &str = "mail/otp";
pub const MAIL_WELCOME: &str = "mail/welcome";
pub const MAIL_ADMIN_NOTIFY: &str = "mail/admin_notify";

const SOURCES: &[(&str, &str)] = &[
    (ENTRY, include_str!("../templates/entry.hbs")),
    (PENDING, include_str!("../templates/pending.hbs")),
    (VERIFIED, include_str!("../templates/verified.hbs")),
    (CONTENT, include_str!("../templates/content.hbs")),
    (ADMIN, include_str!("../templates/admin.hbs")),
    (MAIL_OTP, include_str!("../templates/mail/otp.hbs")),
    (MAIL_WELCOME, include_str!("../templates/mail/welcome.hbs")),
    (MAIL_ADMIN_NOTIFY, include_str!("../templates/mail/admin_notify.hbs")),
];

/// Engine with every auth page and mail registered
pub fn template_engine() -> Result<TemplateEngine, TemplateError> {
    TemplateEngine::with_templates(SOURCES.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_templates_register() {
        let engine = template_engine().unwrap();
        for (name, _) in SOURCES {
            assert!(engine.has_template(name), "{name} missing");
        }
    }

    #[test]
    fn test_entry_renders_without_message() {
        let engine = template_engine().unwrap();
        let html = engine
            .render(ENTRY, &json!({ "message": null, "email": null }))
            .unwrap();
        assert!(html.contains("action=\"/register\""));
        assert!(html.contains("name=\"studentId\""));
        assert!(!html.contains("class=\"notice\""));
    }

    #[test]
    fn test_otp_mail_contains_code() {
        let engine = template_engine().unwrap();
        let html = engine
            .render(
                MAIL_OTP,
                &json!({ "name": "Ada", "otp": "Xy12Ab34", "ttl_minutes": 10 }),
            )
            .unwrap();
        assert!(html.contains("Xy12Ab34"));
        assert!(html.contains("10 minutes"));
    }
}
