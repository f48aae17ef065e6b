//! HTTP server initialization and runtime setup.
//!
//! Chooses the notification sender, builds the services and runs the Axum
//! server until it is stopped.

use crate::application::services::ReservationService;
use crate::config::Config;
use crate::domain::notifier::NotificationSender;
use crate::infrastructure::catalog::StaticVillaRepository;
use crate::infrastructure::notification::{HttpEmailSender, LogNotificationSender};
use crate::infrastructure::session::InMemorySessionStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Picks the email sender when credentials are configured, otherwise the
/// log-only sender.
///
/// # Errors
///
/// Returns an error if the HTTP client for the email API cannot be built.
pub fn build_sender(config: &Config) -> Result<Arc<dyn NotificationSender>> {
    match config.mail_settings() {
        Some(settings) => Ok(Arc::new(HttpEmailSender::new(settings)?)),
        None => {
            tracing::warn!("MAIL_API_KEY not set, reservation requests will only be logged");
            Ok(Arc::new(LogNotificationSender::new()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Villa catalog
/// - Notification sender (email or log-only)
/// - Booking session store
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The notification sender cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let villa_repository = Arc::new(StaticVillaRepository::default());

    let sender = build_sender(&config)?;
    tracing::info!("Notification sender: {}", sender.kind());
    let reservation_service = Arc::new(ReservationService::new(
        sender,
        config.notification_timeout(),
    ));

    let sessions = Arc::new(InMemorySessionStore::new(
        config.session_idle_timeout(),
        config.session_capacity,
    ));

    let state = AppState::new(villa_repository, reservation_service, sessions);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
