//! Domain layer containing the reservation model and its rules.
//!
//! Nothing in this module performs I/O. Calendar math, range selection, guest
//! limits and step transitions are plain synchronous code so they can be
//! exercised directly from unit tests and reused by the CLI.
//!
//! # Architecture
//!
//! - [`calendar`] - Validated days, leap years, month grids
//! - [`range`] - Arrival/departure click selection
//! - [`month_view`] - Two-month view and month navigation
//! - [`guests`] - Bounded adult/child counters
//! - [`booking`] - The four-step booking session
//! - [`entities`] - Villas, guest form, reservation payload
//! - [`repositories`] - Data access trait definitions
//! - [`notifier`] - Outbound notification contract
//!
//! # Booking Flow
//!
//! 1. A villa is chosen on the selection step
//! 2. Dates and guests are picked on the calendar step
//! 3. Guest details are entered and submitted
//! 4. A [`notifier::NotificationSender`] forwards the request; on success the
//!    session shows the confirmation step

pub mod booking;
pub mod calendar;
pub mod entities;
pub mod guests;
pub mod month_view;
pub mod notifier;
pub mod range;
pub mod repositories;
