//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod calendar;
pub mod health;
pub mod send_reservation;
pub mod villas;

pub use calendar::calendar_handler;
pub use health::health_handler;
pub use send_reservation::send_reservation_handler;
pub use villas::{villa_handler, villa_list_handler};
