//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use platform::mail::Mailer;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{SessionGate, require_admin, require_login};

/// Create the Auth router for any repository and mailer
pub fn auth_router<R, M>(state: AuthAppState<R, M>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let gate = SessionGate::new(state.caches.clone(), state.config.clone());

    let members = Router::new()
        .route("/content", get(handlers::content::<R, M>))
        .route_layer(from_fn_with_state(gate.clone(), require_login));

    let admins = Router::new()
        .route("/admin", get(handlers::admin::<R, M>))
        .route("/admin/{*path}", get(handlers::admin::<R, M>))
        .route_layer(from_fn_with_state(gate, require_admin));

    Router::new()
        .route("/", get(handlers::entry::<R, M>))
        .route(
            "/login",
            get(handlers::entry::<R, M>).post(handlers::login::<R, M>),
        )
        .route("/register", post(handlers::register::<R, M>))
        .route("/verify-otp", post(handlers::verify_otp::<R, M>))
        .route("/logout", post(handlers::logout::<R, M>))
        .merge(members)
        .merge(admins)
        .with_state(state)
}
