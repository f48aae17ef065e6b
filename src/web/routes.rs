//! Booking flow route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    back_handler, booking_page_handler, continue_handler, guests_handler, next_month_handler,
    prev_month_handler, reset_handler, select_date_handler, select_villa_handler,
    submit_details_handler,
};
use crate::web::middleware::session;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub const BOOKING_PATH: &str = "/reservations";

/// Booking pages, each bound to the visitor's session cookie via
/// [`crate::web::middleware::session`].
///
/// # Endpoints
///
/// - `GET  /reservations`                 - Render the current step
/// - `POST /reservations/villa`           - Select a villa and advance
/// - `POST /reservations/back`            - Previous step
/// - `POST /reservations/calendar/prev`   - Previous month
/// - `POST /reservations/calendar/next`   - Next month
/// - `POST /reservations/calendar/select` - Click a day
/// - `POST /reservations/guests`          - Set adults and children
/// - `POST /reservations/continue`        - Calendar to details
/// - `POST /reservations/details`         - Submit the guest form
///   (from `submission_routes`)
/// - `POST /reservations/reset`           - Start over after confirmation
pub fn booking_routes(state: AppState, submission_routes: Router<AppState>) -> Router<AppState> {
    Router::new()
        .route(BOOKING_PATH, get(booking_page_handler))
        .route("/reservations/villa", post(select_villa_handler))
        .route("/reservations/back", post(back_handler))
        .route("/reservations/calendar/prev", post(prev_month_handler))
        .route("/reservations/calendar/next", post(next_month_handler))
        .route("/reservations/calendar/select", post(select_date_handler))
        .route("/reservations/guests", post(guests_handler))
        .route("/reservations/continue", post(continue_handler))
        .route("/reservations/reset", post(reset_handler))
        .merge(submission_routes)
        .route_layer(middleware::from_fn_with_state(state, session::layer))
}

/// The guest form submission, which sends a reservation request; rate
/// limited separately.
pub fn submission_routes() -> Router<AppState> {
    Router::new().route("/reservations/details", post(submit_details_handler))
}
