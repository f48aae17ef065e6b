//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`                       - Redirect to the booking flow
//! - `GET  /health`                 - Health check: catalog, notifier, sessions
//! - `/api/*`                       - JSON API (villas, calendar, send-reservation)
//! - `/reservations/*`              - Server-rendered booking flow (cookie session)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on every route that sends a
//!   reservation request (configurable for proxy deployments)
//! - **Booking session** - `booking_session` cookie on the booking flow
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let notification_routes = api::routes::notification_routes();
    let submission_routes = web::routes::submission_routes();
    let (notification_routes, submission_routes) = if behind_proxy {
        (
            notification_routes.layer(rate_limit::proxy_layer()),
            submission_routes.layer(rate_limit::proxy_layer()),
        )
    } else {
        (
            notification_routes.layer(rate_limit::layer()),
            submission_routes.layer(rate_limit::layer()),
        )
    };

    let router = site_routes(state.clone(), notification_routes, submission_routes)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// All routes, with the routes that send reservation requests supplied by the
/// caller.
///
/// The rate limiter needs the peer address from `ConnectInfo`, which
/// in-process test servers do not provide, so tests pass
/// [`api::routes::notification_routes`] and
/// [`web::routes::submission_routes`] without a limiter.
pub fn site_routes(
    state: AppState,
    notification_routes: Router<AppState>,
    submission_routes: Router<AppState>,
) -> Router<AppState> {
    let api_router = api::routes::public_routes().merge(notification_routes);

    Router::new()
        .route("/", get(|| async { Redirect::to(web::routes::BOOKING_PATH) }))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(web::routes::booking_routes(state, submission_routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ReservationService;
    use crate::infrastructure::catalog::StaticVillaRepository;
    use crate::infrastructure::notification::LogNotificationSender;
    use crate::infrastructure::session::InMemorySessionStore;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode, header};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn state() -> AppState {
        let reservation_service = Arc::new(ReservationService::new(
            Arc::new(LogNotificationSender::new()),
            Duration::from_secs(5),
        ));
        let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(60), 100));
        AppState::new(
            Arc::new(StaticVillaRepository::default()),
            reservation_service,
            sessions,
        )
    }

    fn guest_form() -> Request<Body> {
        Request::post("/reservations/details")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("firstName=Ana&lastName=Silva"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_guest_form_is_rate_limited_per_peer() {
        let app = app_router(state(), false);
        let peer: SocketAddr = "203.0.113.7:40000".parse().unwrap();

        for _ in 0..5 {
            let mut request = guest_form();
            request.extensions_mut().insert(ConnectInfo(peer));
            let response = app.clone().oneshot(request).await.unwrap();
            assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        }

        let mut request = guest_form();
        request.extensions_mut().insert(ConnectInfo(peer));
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_guest_form_behind_proxy_uses_forwarded_ip() {
        let app = app_router(state(), true);
        let forwarded = |ip: &str| {
            let mut request = guest_form();
            request
                .headers_mut()
                .insert("x-forwarded-for", ip.parse().unwrap());
            request
        };

        for _ in 0..5 {
            let response = app.clone().oneshot(forwarded("198.51.100.1")).await.unwrap();
            assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        }

        let response = app.clone().oneshot(forwarded("198.51.100.1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let response = app.clone().oneshot(forwarded("198.51.100.2")).await.unwrap();
        assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_other_booking_routes_are_not_limited() {
        let app = app_router(state(), false);

        for _ in 0..8 {
            let request = Request::get("/reservations").body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
