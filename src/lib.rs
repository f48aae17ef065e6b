//! # Villa Reservations
//!
//! Reservation flow and notification service for a boutique villa property,
//! built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Calendar math, date ranges, guest counts and the booking step machine
//! - **Application Layer** ([`application`]) - Villa lookups, booking sessions and reservation delivery
//! - **Infrastructure Layer** ([`infrastructure`]) - Villa catalog, notification senders, session store
//! - **API Layer** ([`api`]) - JSON endpoints, DTOs, and middleware
//! - **Web Layer** ([`web`]) - Server-rendered four-step booking flow
//!
//! ## Features
//!
//! - Two-month calendar with click-to-select arrival and departure
//! - Bounded adult and child counters
//! - Guest form with required-field validation
//! - Reservation requests emailed through a transactional email API, or logged
//! - Per-IP rate limiting on outbound notifications
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: email delivery
//! export MAIL_API_KEY="re_..."
//! export MAIL_TO="reservations@villas.example"
//!
//! # Start the service and open http://localhost:3000/reservations
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{BookingService, ReservationService, VillaService};
    pub use crate::domain::booking::{BookingSession, Step};
    pub use crate::domain::entities::{DeliveryReceipt, GuestFormData, ReservationPayload, Villa};
    pub use crate::domain::notifier::NotificationSender;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
