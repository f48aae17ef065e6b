//! API route configuration.

use crate::api::handlers::{
    calendar_handler, send_reservation_handler, villa_handler, villa_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Read-only catalog and calendar routes.
///
/// # Endpoints
///
/// - `GET /villas`       - List villas
/// - `GET /villas/{id}`  - Single villa
/// - `GET /calendar`     - Month grid (`?month=&year=`, month zero-based)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/villas", get(villa_list_handler))
        .route("/villas/{id}", get(villa_handler))
        .route("/calendar", get(calendar_handler))
}

/// Routes that trigger outbound notifications; rate limited separately.
///
/// # Endpoints
///
/// - `POST /send-reservation` - Forward a reservation request
pub fn notification_routes() -> Router<AppState> {
    Router::new().route("/send-reservation", post(send_reservation_handler))
}
