//! Core domain entities.
//!
//! Entities are plain data structures without side effects.
//!
//! # Entity Types
//!
//! - [`Villa`] - A catalog entry guests can book
//! - [`GuestFormData`] - Contact details entered on the details step
//! - [`ReservationPayload`] - The request forwarded to the reservations team
//! - [`DeliveryReceipt`] - Result of a successful notification send

pub mod guest_form;
pub mod reservation;
pub mod villa;

pub use guest_form::{GuestFormData, Prefix};
pub use reservation::{DeliveryReceipt, ReservationPayload};
pub use villa::Villa;
