//! Reservation notification senders.
//!
//! Provides two implementations of [`crate::domain::notifier::NotificationSender`]:
//! - [`HttpEmailSender`] - Production sender posting to a transactional email API
//! - [`LogNotificationSender`] - Logs the request instead of sending it

mod email;
mod http_sender;
mod log_sender;

pub use email::{RenderedEmail, render_reservation_email};
pub use http_sender::{HttpEmailSender, MailSettings};
pub use log_sender::LogNotificationSender;
