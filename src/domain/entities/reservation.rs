//! Reservation request handed to the notification sender.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::guest_form::GuestFormData;
use super::villa::Villa;
use crate::domain::calendar::CalendarDay;
use crate::domain::guests::GuestCount;

/// JSON payload describing one reservation request.
///
/// Dates are pre-formatted (`"Weekday, Month Day, Year"`) because the
/// payload is only ever read by people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "arrival is required"))]
    pub arrival: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "departure is required"))]
    pub departure: String,

    #[serde(default)]
    pub adults: u32,

    #[serde(default)]
    pub children: u32,

    #[serde(default)]
    pub villa_name: String,

    #[serde(default)]
    pub guest_info: GuestFormData,
}

impl ReservationPayload {
    /// Assembles the payload for a completed booking session.
    pub fn new(
        villa: &Villa,
        arrival: CalendarDay,
        departure: CalendarDay,
        guests: GuestCount,
        form: &GuestFormData,
    ) -> Self {
        Self {
            name: form.full_name(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            arrival: arrival.format_long(),
            departure: departure.format_long(),
            adults: u32::from(guests.adults()),
            children: u32::from(guests.children()),
            villa_name: villa.name.clone(),
            guest_info: form.clone(),
        }
    }

    /// Email subject line for the reservations inbox.
    pub fn subject(&self) -> String {
        format!(
            "New reservation request: {} ({} – {})",
            self.villa_name, self.arrival, self.departure
        )
    }
}

/// Proof of a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub message_id: String,
}
