//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{BookingService, ReservationService, VillaService};
use crate::infrastructure::catalog::StaticVillaRepository;
use crate::infrastructure::session::InMemorySessionStore;

pub type AppVillaService = VillaService<StaticVillaRepository>;
pub type AppBookingService = BookingService<StaticVillaRepository>;

#[derive(Clone)]
pub struct AppState {
    pub villa_service: Arc<AppVillaService>,
    pub reservation_service: Arc<ReservationService>,
    pub booking_service: Arc<AppBookingService>,
}

impl AppState {
    /// Wires the services around one catalog, sender and session store.
    pub fn new(
        villa_repository: Arc<StaticVillaRepository>,
        reservation_service: Arc<ReservationService>,
        sessions: Arc<InMemorySessionStore>,
    ) -> Self {
        let villa_service = Arc::new(VillaService::new(villa_repository));
        let booking_service = Arc::new(BookingService::new(
            sessions,
            villa_service.clone(),
            reservation_service.clone(),
        ));

        Self {
            villa_service,
            reservation_service,
            booking_service,
        }
    }
}
