//! Sender that only logs reservation requests.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::entities::{DeliveryReceipt, ReservationPayload};
use crate::domain::notifier::NotificationSender;
use crate::utils::id_generator::generate_message_id;

/// A sender that records the request in the log and reports success.
///
/// # Use Cases
///
/// - Development environments without email credentials
/// - Demo deployments where requests are read from the log
pub struct LogNotificationSender;

impl LogNotificationSender {
    pub fn new() -> Self {
        debug!("Using LogNotificationSender (email delivery disabled)");
        Self
    }
}

impl Default for LogNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(
        &self,
        payload: &ReservationPayload,
    ) -> Result<DeliveryReceipt, crate::error::AppError> {
        let message_id = generate_message_id();

        info!(
            %message_id,
            villa = %payload.villa_name,
            arrival = %payload.arrival,
            departure = %payload.departure,
            adults = payload.adults,
            children = payload.children,
            "Reservation request received (not emailed)"
        );
        debug!(?payload, "Reservation payload");

        Ok(DeliveryReceipt { message_id })
    }

    fn kind(&self) -> &'static str {
        "log"
    }
}
