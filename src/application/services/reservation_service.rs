//! Reservation request delivery.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::entities::{DeliveryReceipt, ReservationPayload};
use crate::domain::notifier::NotificationSender;
use crate::error::AppError;

/// Validates reservation payloads and hands them to the configured sender.
///
/// Each send is bounded by `timeout`. A failed or timed-out send is reported
/// to the caller and never retried here.
pub struct ReservationService {
    sender: Arc<dyn NotificationSender>,
    timeout: Duration,
}

impl ReservationService {
    pub fn new(sender: Arc<dyn NotificationSender>, timeout: Duration) -> Self {
        Self { sender, timeout }
    }

    /// Kind of the underlying sender, e.g. `"email"` or `"log"`.
    pub fn sender_kind(&self) -> &'static str {
        self.sender.kind()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one reservation request.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if a required field is empty; the sender is
    ///   not called
    /// - [`AppError::Delivery`] if the sender fails or does not answer within
    ///   the timeout
    pub async fn send(&self, payload: &ReservationPayload) -> Result<DeliveryReceipt, AppError> {
        payload.validate()?;

        let result = tokio::time::timeout(self.timeout, self.sender.send(payload)).await;

        match result {
            Ok(Ok(receipt)) => {
                info!(
                    message_id = %receipt.message_id,
                    villa = %payload.villa_name,
                    sender = self.sender.kind(),
                    "Reservation request delivered"
                );
                Ok(receipt)
            }
            Ok(Err(e)) => {
                warn!(
                    villa = %payload.villa_name,
                    sender = self.sender.kind(),
                    error = %e,
                    "Reservation request delivery failed"
                );
                Err(e)
            }
            Err(_) => {
                warn!(
                    villa = %payload.villa_name,
                    timeout_secs = self.timeout.as_secs(),
                    "Reservation request delivery timed out"
                );
                Err(AppError::delivery(
                    "Reservation request timed out",
                    json!({ "timeout_ms": self.timeout.as_millis() as u64 }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GuestFormData, Prefix};
    use crate::domain::notifier::MockNotificationSender;

    fn payload() -> ReservationPayload {
        ReservationPayload {
            name: "Mr Tomas Novak".to_string(),
            email: "tomas@example.com".to_string(),
            phone: "+420 777 000 111".to_string(),
            arrival: "Monday, April 1, 2024".to_string(),
            departure: "Friday, April 5, 2024".to_string(),
            adults: 2,
            children: 1,
            villa_name: "Villa Aurora".to_string(),
            guest_info: GuestFormData {
                prefix: Prefix::Mr,
                first_name: "Tomas".to_string(),
                last_name: "Novak".to_string(),
                email: "tomas@example.com".to_string(),
                phone: "+420 777 000 111".to_string(),
                special_request: String::new(),
            },
        }
    }

    fn service(sender: MockNotificationSender) -> ReservationService {
        ReservationService::new(Arc::new(sender), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_send_success() {
        let mut sender = MockNotificationSender::new();
        sender
            .expect_send()
            .withf(|p| p.villa_name == "Villa Aurora" && p.children == 1)
            .times(1)
            .returning(|_| {
                Ok(DeliveryReceipt {
                    message_id: "msg-123".to_string(),
                })
            });
        sender.expect_kind().return_const("mock");

        let receipt = service(sender).send(&payload()).await.unwrap();
        assert_eq!(receipt.message_id, "msg-123");
    }

    #[tokio::test]
    async fn test_missing_field_skips_sender() {
        let mut sender = MockNotificationSender::new();
        sender.expect_send().times(0);

        let invalid = ReservationPayload {
            phone: String::new(),
            ..payload()
        };
        let err = service(sender).send(&invalid).await.unwrap_err();

        assert_eq!(err.code(), "validation_error");
        assert_eq!(err.details()["fields"], json!(["phone"]));
    }

    #[tokio::test]
    async fn test_sender_failure_is_returned() {
        let mut sender = MockNotificationSender::new();
        sender
            .expect_send()
            .times(1)
            .returning(|_| Err(AppError::delivery("Mail API rejected", json!({ "status": 502 }))));
        sender.expect_kind().return_const("mock");

        let err = service(sender).send(&payload()).await.unwrap_err();

        assert_eq!(err.code(), "delivery_error");
        assert_eq!(err.details()["status"], 502);
    }

    struct SlowSender;

    #[async_trait::async_trait]
    impl NotificationSender for SlowSender {
        async fn send(&self, _: &ReservationPayload) -> Result<DeliveryReceipt, AppError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(DeliveryReceipt {
                message_id: "late".to_string(),
            })
        }

        fn kind(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_timeout_is_delivery_error() {
        let service = ReservationService::new(Arc::new(SlowSender), Duration::from_millis(50));

        let err = service.send(&payload()).await.unwrap_err();

        assert_eq!(err.code(), "delivery_error");
        assert_eq!(err.details()["timeout_ms"], 50);
    }
}
