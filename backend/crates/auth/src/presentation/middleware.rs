//! Session Gates
//!
//! Route layers for pages that need a login or an admin. On success the
//! resolved [`AuthSession`] is placed in the request extensions; otherwise
//! the browser is redirected.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::error::AuthResult;
use crate::infra::memory::AuthCaches;

/// Where a request without a session is sent
pub const LOGIN_REDIRECT: &str = "/login";
/// Where a request without admin rights is sent
pub const ADMIN_REDIRECT: &str = "/";

/// Middleware state
#[derive(Clone)]
pub struct SessionGate {
    pub caches: Arc<AuthCaches>,
    pub config: Arc<AuthConfig>,
}

impl SessionGate {
    pub fn new(caches: Arc<AuthCaches>, config: Arc<AuthConfig>) -> Self {
        Self { caches, config }
    }

    fn check<F>(&self, headers: &HeaderMap, check: F) -> Option<AuthSession>
    where
        F: FnOnce(&CheckSessionUseCase, &str) -> AuthResult<AuthSession>,
    {
        let token = platform::cookie::extract_cookie(headers, &self.config.session_cookie_name)?;
        let use_case = CheckSessionUseCase::new(self.caches.clone(), self.config.clone());
        check(&use_case, &token).ok()
    }
}

/// Middleware that requires a logged-in session
pub async fn require_login(
    State(gate): State<SessionGate>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = gate.check(req.headers(), CheckSessionUseCase::execute);
    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "No session, redirecting to login");
            Redirect::to(LOGIN_REDIRECT).into_response()
        }
    }
}

/// Middleware that requires a session on the admin allow-list
pub async fn require_admin(
    State(gate): State<SessionGate>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = gate.check(req.headers(), CheckSessionUseCase::execute_admin);
    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "Admin gate denied");
            Redirect::to(ADMIN_REDIRECT).into_response()
        }
    }
}
