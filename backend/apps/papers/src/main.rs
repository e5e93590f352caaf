//! Past Papers Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod settings;

use auth::{AuthAppState, AuthCaches, PgUserRepository, auth_router};
use platform::mail::{LogMailer, MailTransport, SmtpMailer};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kernel::error::app_error::AppError;
use settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "papers=info,auth=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let mailer = match &settings.smtp {
        Some(smtp) => MailTransport::Smtp(SmtpMailer::new(smtp)?),
        None => {
            tracing::warn!("SMTP_HOST not set, mail will only be logged");
            MailTransport::Log(LogMailer)
        }
    };
    tracing::info!(
        transport = mailer.kind(),
        delivery = ?settings.auth.mail_delivery,
        admins = settings.auth.admin_list.len(),
        "Mail configured"
    );

    // In-memory stores live for the whole process
    let caches = Arc::new(AuthCaches::new());
    let sweepers = caches.spawn_sweepers(settings.auth.cache_sweep_interval);

    let state = AuthAppState::new(
        PgUserRepository::new(pool.clone()),
        mailer,
        settings.auth,
        caches,
    )?;

    // Build router
    let app = auth_router(state)
        .fallback(|| async { AppError::not_found("Page not found") })
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = TcpListener::bind(settings.listen_addr).await?;
    tracing::info!("Listening on {}", settings.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweepers.shutdown();
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
