//! Cookie Management Infrastructure
//!
//! Building `Set-Cookie` values and reading cookies back from requests.

use axum::http::{HeaderMap, HeaderValue, header};
use std::str::FromStr;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            other => Err(format!("unknown SameSite policy: {other}")),
        }
    }
}

/// Cookie attributes shared by every `Set-Cookie` for one cookie name
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<u64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie value that makes the browser drop the cookie
    pub fn build_delete_cookie(&self) -> String {
        let expired = CookieConfig {
            max_age_secs: Some(0),
            ..self.clone()
        };
        format!(
            "{}; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            expired.build_set_cookie("")
        )
    }

    /// Set-Cookie as a header value
    ///
    /// Fails only when `value` contains bytes that are invalid in a header.
    pub fn header_value(
        &self,
        value: &str,
    ) -> Result<HeaderValue, http::header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value))
    }

    /// Deletion Set-Cookie as a header value
    pub fn delete_header_value(&self) -> Result<HeaderValue, http::header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie())
    }
}

/// Extract a cookie value from headers
///
/// Looks through every `Cookie` header; the first matching pair wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CookieConfig {
        CookieConfig {
            name: "papers_session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: Some(3600),
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let cookie = config().build_set_cookie("token123");
        assert_eq!(
            cookie,
            "papers_session=token123; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=3600"
        );
    }

    #[test]
    fn test_insecure_cookie_omits_secure() {
        let cookie = CookieConfig {
            secure: false,
            ..config()
        }
        .build_set_cookie("v");
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = config().build_delete_cookie();
        assert!(cookie.starts_with("papers_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; papers_session=abc.def; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "papers_session"),
            Some("abc.def".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
        assert_eq!(extract_cookie(&headers, "b"), Some("2".to_string()));
    }

    #[test]
    fn test_same_site_parse() {
        assert_eq!("strict".parse::<SameSite>(), Ok(SameSite::Strict));
        assert_eq!(" Lax ".parse::<SameSite>(), Ok(SameSite::Lax));
        assert!("sometimes".parse::<SameSite>().is_err());
    }
}
