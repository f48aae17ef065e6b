//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations: it loads villas, drives booking
//! sessions through the session store and hands reservation requests to the
//! notification sender. HTTP handlers and the CLI call into these services
//! rather than the domain types directly.
//!
//! # Available Services
//!
//! - [`services::villa_service::VillaService`] - Villa catalog lookups
//! - [`services::reservation_service::ReservationService`] - Validated, time-bounded delivery
//! - [`services::booking_service::BookingService`] - Per-visitor booking flow

pub mod services;
