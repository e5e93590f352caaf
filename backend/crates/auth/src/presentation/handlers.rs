//! HTTP Handlers

use axum::extract::rejection::FormRejection;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde::Serialize;
use std::sync::Arc;

use platform::mail::Mailer;
use platform::template::TemplateEngine;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginOutput, LoginUseCase, Notifier, RegisterInput, RegisterUseCase,
    SignOutUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::AuthCaches;
use crate::presentation::dto::{
    AdminPage, ContentPage, EntryPage, LoginForm, PendingPage, RegisterForm, VerifiedPage,
    VerifyOtpForm,
};
use crate::templates;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
    pub caches: Arc<AuthCaches>,
    pub templates: Arc<TemplateEngine>,
}

impl<R, M> AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    /// Build state with the embedded templates
    pub fn new(
        repo: R,
        mailer: M,
        config: AuthConfig,
        caches: Arc<AuthCaches>,
    ) -> AuthResult<Self> {
        Ok(Self {
            repo: Arc::new(repo),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
            caches,
            templates: Arc::new(templates::template_engine()?),
        })
    }

    fn notifier(&self) -> Notifier<M> {
        Notifier::new(self.mailer.clone(), self.templates.clone(), self.config.clone())
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> AuthResult<Html<String>> {
        Ok(Html(self.templates.render(name, data)?))
    }

    fn session_cookie(&self, token: &str) -> AuthResult<HeaderValue> {
        self.config
            .session_cookie()
            .header_value(token)
            .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))
    }

    fn clear_cookie(&self) -> AuthResult<HeaderValue> {
        self.config
            .session_cookie()
            .delete_header_value()
            .map_err(|e| AuthError::Internal(format!("Invalid session cookie: {e}")))
    }
}

/// Unwrap a form body, reading a missing body as an empty form
///
/// Any other rejection (wrong content type, duplicate or malformed fields)
/// is a 400 rendered like every other `AuthError`.
fn read_form<T: Default>(form: Result<Form<T>, FormRejection>) -> AuthResult<T> {
    match form {
        Ok(Form(form)) => Ok(form),
        Err(FormRejection::MissingFormContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(AuthError::invalid_input("form", rejection.body_text())),
    }
}

// ============================================================================
// Entry
// ============================================================================

/// GET / and GET /login
pub async fn entry<R, M>(State(state): State<AuthAppState<R, M>>) -> AuthResult<Html<String>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    state.render(templates::ENTRY, &EntryPage::default())
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> AuthResult<Html<String>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let form = read_form(form)?;
    let use_case =
        RegisterUseCase::new(state.caches.clone(), state.notifier(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            email: form.email,
            name: form.name,
            student_id: form.student_id,
        })
        .await?;

    state.render(
        templates::PENDING,
        &PendingPage {
            email: output.email.to_string(),
            name: output.name.to_string(),
            ttl_minutes: state.config.otp_ttl_minutes(),
        },
    )
}

// ============================================================================
// Verify OTP
// ============================================================================

/// POST /verify-otp
pub async fn verify_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    form: Result<Form<VerifyOtpForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let form = read_form(form)?;
    let use_case = VerifyOtpUseCase::new(
        state.repo.clone(),
        state.caches.clone(),
        state.notifier(),
        state.config.clone(),
    );

    let output = use_case
        .execute(VerifyOtpInput {
            email: form.email,
            otp: form.otp,
        })
        .await?;

    let cookie = state.session_cookie(&output.session_token)?;
    let page = state.render(
        templates::VERIFIED,
        &VerifiedPage {
            email: output.user.email.to_string(),
            name: output.user.name.to_string(),
        },
    )?;

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], page).into_response())
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    // An unreadable login form is just an unknown user.
    let form = read_form(form).unwrap_or_default();
    let use_case =
        LoginUseCase::new(state.repo.clone(), state.caches.clone(), state.config.clone());

    let email = form.email.trim().to_string();
    match use_case.execute(LoginInput { email: form.email }).await? {
        LoginOutput::SignedIn { session_token } => {
            let cookie = state.session_cookie(&session_token)?;
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/content")).into_response())
        }
        LoginOutput::Unknown => {
            let page = EntryPage {
                message: Some("No account found for that email. Register below.".to_string()),
                email: Some(email).filter(|e| !e.is_empty()),
            };
            Ok(state.render(templates::ENTRY, &page)?.into_response())
        }
    }
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
pub async fn logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.caches.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token);
    }

    let cookie = state.clear_cookie()?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")))
}

// ============================================================================
// Protected pages (behind the session middleware)
// ============================================================================

/// GET /content
pub async fn content<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(session): Extension<AuthSession>,
) -> AuthResult<Html<String>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    state.render(
        templates::CONTENT,
        &ContentPage {
            email: session.email.to_string(),
        },
    )
}

/// GET /admin and /admin/{*path}
pub async fn admin<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(session): Extension<AuthSession>,
    OriginalUri(uri): OriginalUri,
) -> AuthResult<Html<String>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    state.render(
        templates::ADMIN,
        &AdminPage {
            email: session.email.to_string(),
            path: uri.path().to_string(),
        },
    )
}
