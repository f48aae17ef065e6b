//! Business logic services for the application layer.

pub mod booking_service;
pub mod reservation_service;
pub mod villa_service;

pub use booking_service::BookingService;
pub use reservation_service::ReservationService;
pub use villa_service::VillaService;
