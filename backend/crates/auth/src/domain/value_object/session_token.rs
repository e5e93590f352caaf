//! Session Token Value Object
//!
//! Cookie value `"{session_id}.{signature}"`, where the signature is
//! base64url(HMAC-SHA256(secret, session_id)). The token carries no identity;
//! it only names a server-side session.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use kernel::id::SessionId;
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &[u8], session_id: &str) -> AuthResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AuthError::Internal(format!("Invalid session secret: {e}")))?;
    mac.update(session_id.as_bytes());
    Ok(mac)
}

/// Sign `session_id` into a cookie value
pub fn issue(session_id: &SessionId, secret: &[u8]) -> AuthResult<String> {
    let session_id = session_id.to_string();
    let signature = mac_for(secret, &session_id)?.finalize().into_bytes();
    Ok(format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature)))
}

/// Check the signature and recover the session id
pub fn verify(token: &str, secret: &[u8]) -> AuthResult<SessionId> {
    let (session_id, signature_b64) = token
        .split_once('.')
        .ok_or(AuthError::SessionInvalid)?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    mac_for(secret, session_id)?
        .verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    session_id.parse().map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_issue_then_verify() {
        let id = SessionId::new();
        let token = issue(&id, &SECRET).unwrap();
        assert!(token.starts_with(&id.to_string()));
        assert_eq!(verify(&token, &SECRET).unwrap(), id);
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = issue(&SessionId::new(), &SECRET).unwrap();
        assert!(matches!(
            verify(&token, &[8u8; 32]),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_rejects_tampered_id() {
        let token = issue(&SessionId::new(), &SECRET).unwrap();
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), sig);
        assert!(verify(&forged, &SECRET).is_err());
    }

    #[test]
    fn test_rejects_plain_email_cookie() {
        assert!(verify("student@example.com", &SECRET).is_err());
        assert!(verify("", &SECRET).is_err());
        assert!(verify("a.b.c", &SECRET).is_err());
    }
}
