//! Outbound reservation notification contract.

use crate::domain::entities::{DeliveryReceipt, ReservationPayload};
use crate::error::AppError;
use async_trait::async_trait;

/// Delivers a reservation request to the reservations team.
///
/// The booking flow treats a sender as a black box that either succeeds with a
/// [`DeliveryReceipt`] or fails. Implementations must not retry on their own:
/// there is no deduplication downstream, so a retried send may reach the
/// inbox twice.
///
/// # Implementations
///
/// - [`crate::infrastructure::notification::HttpEmailSender`] - Transactional email API
/// - [`crate::infrastructure::notification::LogNotificationSender`] - Logs instead of sending
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Sends one reservation request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Delivery`] when the message could not be handed
    /// over for delivery.
    async fn send(&self, payload: &ReservationPayload) -> Result<DeliveryReceipt, AppError>;

    /// Short identifier used in logs and health output.
    fn kind(&self) -> &'static str;
}
