//! DTOs for the reservation notification endpoint.
//!
//! The request body is [`crate::domain::entities::ReservationPayload`] itself.
//! Responses use a flat shape rather than the nested `{"error": {...}}`
//! envelope of the other endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Successful delivery.
///
/// ```json
/// { "success": true, "messageId": "4ef9a1c2" }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReservationResponse {
    pub success: bool,
    pub message_id: String,
}

/// Rejected or failed delivery.
///
/// ```json
/// { "error": "Validation failed", "details": { "fields": ["phone"] } }
/// ```
#[derive(Debug, Serialize)]
pub struct SendReservationFailure {
    pub error: String,
    pub details: Value,
}

impl From<&AppError> for SendReservationFailure {
    fn from(e: &AppError) -> Self {
        Self {
            error: e.message().to_string(),
            details: e.details().clone(),
        }
    }
}
