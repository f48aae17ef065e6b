#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::http::{HeaderValue, header::SET_COOKIE};
use axum_test::{TestResponse, TestServer};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use villa_reservations::api::routes::notification_routes;
use villa_reservations::application::services::ReservationService;
use villa_reservations::domain::entities::{DeliveryReceipt, ReservationPayload, Villa};
use villa_reservations::domain::notifier::NotificationSender;
use villa_reservations::error::AppError;
use villa_reservations::infrastructure::catalog::StaticVillaRepository;
use villa_reservations::infrastructure::session::InMemorySessionStore;
use villa_reservations::routes::site_routes;
use villa_reservations::state::AppState;
use villa_reservations::web::routes::submission_routes;

/// Sender that records every payload instead of delivering it.
pub struct RecordingSender {
    sent: Mutex<Vec<ReservationPayload>>,
    fail: bool,
}

impl RecordingSender {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    /// A sender whose every delivery fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<ReservationPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, payload: &ReservationPayload) -> Result<DeliveryReceipt, AppError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(payload.clone());

        if self.fail {
            return Err(AppError::delivery(
                "Mail API returned 503",
                json!({ "status": 503 }),
            ));
        }

        Ok(DeliveryReceipt {
            message_id: format!("test-{}", sent.len()),
        })
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}

pub fn create_test_state_with(villas: Vec<Villa>, sender: Arc<RecordingSender>) -> AppState {
    let reservation_service = Arc::new(ReservationService::new(sender, Duration::from_secs(5)));
    let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(600), 100));

    AppState::new(
        Arc::new(StaticVillaRepository::new(villas)),
        reservation_service,
        sessions,
    )
}

pub fn create_test_state(sender: Arc<RecordingSender>) -> AppState {
    create_test_state_with(StaticVillaRepository::builtin(), sender)
}

/// Full site without the rate limiter, which needs a real peer address.
pub fn create_test_app(state: AppState) -> Router {
    site_routes(state.clone(), notification_routes(), submission_routes()).with_state(state)
}

pub fn create_test_server(sender: Arc<RecordingSender>) -> TestServer {
    TestServer::new(create_test_app(create_test_state(sender))).unwrap()
}

/// The `name=value` part of the booking session `Set-Cookie` header.
pub fn session_cookie(response: &TestResponse) -> HeaderValue {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap();
    let pair = set_cookie.split(';').next().unwrap().trim();
    HeaderValue::from_str(pair).unwrap()
}
