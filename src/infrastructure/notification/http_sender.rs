//! Transactional email API sender.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use super::email::render_reservation_email;
use crate::domain::entities::{DeliveryReceipt, ReservationPayload};
use crate::domain::notifier::NotificationSender;
use crate::error::AppError;

/// Connection settings for the email API.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// Endpoint accepting `POST` requests with a JSON message.
    pub api_url: String,
    /// Sent as `Authorization: Bearer <key>`.
    pub api_key: String,
    /// Sender, e.g. `"Villa Reservations <reservations@example.com>"`.
    pub from: String,
    /// Reservations team inbox(es).
    pub to: Vec<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    from: &'a str,
    to: &'a [String],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct AcceptedMessage {
    id: String,
}

/// Sends reservation requests through an HTTP email API.
///
/// The request body follows the common transactional-email shape
/// (`from`, `to`, `reply_to`, `subject`, `html`, `text`) and the response is
/// expected to carry the provider's message `id`. The guest's address is used
/// as `reply_to` so the team can answer directly.
pub struct HttpEmailSender {
    client: reqwest::Client,
    settings: MailSettings,
}

impl HttpEmailSender {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(settings: MailSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("villa-reservations/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!("Email delivery enabled via {}", settings.api_url);

        Ok(Self { client, settings })
    }
}

#[async_trait]
impl NotificationSender for HttpEmailSender {
    async fn send(&self, payload: &ReservationPayload) -> Result<DeliveryReceipt, AppError> {
        let email = render_reservation_email(payload)?;
        let message = OutgoingMessage {
            from: &self.settings.from,
            to: &self.settings.to,
            reply_to: &payload.email,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_key)
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                error!("Email API request failed: {}", e);
                AppError::delivery(
                    "Failed to send reservation email",
                    json!({ "reason": e.to_string(), "timeout": e.is_timeout() }),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Email API rejected message: {} {}", status, body);
            return Err(AppError::delivery(
                "Failed to send reservation email",
                json!({ "status": status.as_u16(), "body": body }),
            ));
        }

        let accepted: AcceptedMessage = response.json().await.map_err(|e| {
            AppError::delivery(
                "Email API returned an unexpected response",
                json!({ "reason": e.to_string() }),
            )
        })?;

        info!(message_id = %accepted.id, villa = %payload.villa_name, "Reservation email sent");

        Ok(DeliveryReceipt {
            message_id: accepted.id,
        })
    }

    fn kind(&self) -> &'static str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GuestFormData;
    use httpmock::prelude::*;

    fn payload() -> ReservationPayload {
        ReservationPayload {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            arrival: "Monday, April 1, 2024".to_string(),
            departure: "Friday, April 5, 2024".to_string(),
            adults: 2,
            children: 0,
            villa_name: "Villa Olivia".to_string(),
            guest_info: GuestFormData::default(),
        }
    }

    fn sender(server: &MockServer, timeout: Duration) -> HttpEmailSender {
        HttpEmailSender::new(MailSettings {
            api_url: server.url("/emails"),
            api_key: "test-key".to_string(),
            from: "Villa Reservations <reservations@example.com>".to_string(),
            to: vec!["team@example.com".to_string()],
            timeout,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/emails")
                    .header("authorization", "Bearer test-key")
                    .body_contains("Villa Olivia")
                    .body_contains("\"reply_to\":\"jane@example.com\"")
                    .body_contains("team@example.com");
                then.status(200).json_body(serde_json::json!({ "id": "msg_123" }));
            })
            .await;

        let receipt = sender(&server, Duration::from_secs(5))
            .send(&payload())
            .await
            .unwrap();

        assert_eq!(receipt.message_id, "msg_123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_provider_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(422).body("invalid from address");
            })
            .await;

        let err = sender(&server, Duration::from_secs(5))
            .send(&payload())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "delivery_error");
        assert_eq!(err.details()["status"], 422);
        assert_eq!(err.details()["body"], "invalid from address");
    }

    #[tokio::test]
    async fn test_send_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(serde_json::json!({ "id": "late" }));
            })
            .await;

        let err = sender(&server, Duration::from_millis(100))
            .send(&payload())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "delivery_error");
        assert_eq!(err.details()["timeout"], true);
    }

    #[tokio::test]
    async fn test_send_unexpected_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(200).body("ok");
            })
            .await;

        let err = sender(&server, Duration::from_secs(5))
            .send(&payload())
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Email API returned an unexpected response");
    }
}
