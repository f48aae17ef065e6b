//! Handler for the reservation notification endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::reservation::{SendReservationFailure, SendReservationResponse};
use crate::domain::entities::ReservationPayload;
use crate::error::AppError;
use crate::state::AppState;

/// Forwards one reservation request to the reservations team.
///
/// # Endpoint
///
/// `POST /api/send-reservation`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Mr Tomas Novak",
///   "email": "tomas@example.com",
///   "phone": "+420 777 000 111",
///   "arrival": "Monday, April 1, 2024",
///   "departure": "Friday, April 5, 2024",
///   "adults": 2,
///   "children": 1,
///   "villaName": "Villa Aurora",
///   "guestInfo": { "prefix": "Mr", "firstName": "Tomas", ... }
/// }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: `{ "success": true, "messageId": "..." }`
/// - **400 Bad Request**: a required field is missing or the body is not JSON
/// - **500 Internal Server Error**: delivery failed or timed out
pub async fn send_reservation_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReservationPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            return failure(AppError::bad_request(
                "Invalid request body",
                json!({ "reason": rejection.body_text() }),
            ));
        }
    };

    match state.reservation_service.send(&payload).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(SendReservationResponse {
                success: true,
                message_id: receipt.message_id,
            }),
        )
            .into_response(),
        Err(e) => failure(e),
    }
}

fn failure(e: AppError) -> Response {
    (e.status(), Json(SendReservationFailure::from(&e))).into_response()
}
