//! Booking flow orchestration.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::json;
use tracing::{debug, error, warn};

use super::reservation_service::ReservationService;
use super::villa_service::VillaService;
use crate::domain::booking::{BookingSession, Step};
use crate::domain::entities::{DeliveryReceipt, GuestFormData, ReservationPayload};
use crate::domain::month_view::MonthCursor;
use crate::domain::repositories::VillaRepository;
use crate::error::AppError;
use crate::infrastructure::session::InMemorySessionStore;
use crate::utils::id_generator::is_valid_session_id;

/// Drives one [`BookingSession`] per visitor.
///
/// Every step action is a single [`InMemorySessionStore::update`] call, so it
/// either applies fully or leaves the session as it was. Submission is split
/// in two: the session is marked in flight under the store lock, the
/// notification is sent without holding it, and the outcome is recorded
/// afterwards.
pub struct BookingService<R: VillaRepository> {
    sessions: Arc<InMemorySessionStore>,
    villas: Arc<VillaService<R>>,
    reservations: Arc<ReservationService>,
}

impl<R: VillaRepository> BookingService<R> {
    pub fn new(
        sessions: Arc<InMemorySessionStore>,
        villas: Arc<VillaService<R>>,
        reservations: Arc<ReservationService>,
    ) -> Self {
        Self {
            sessions,
            villas,
            reservations,
        }
    }

    pub fn sessions(&self) -> &InMemorySessionStore {
        &self.sessions
    }

    /// Returns the session named by `cookie`, or opens a new one.
    ///
    /// The flag is `true` when a new session was opened and the caller must
    /// hand its ID back to the client.
    pub async fn resolve(&self, cookie: Option<&str>) -> (String, bool) {
        if let Some(id) = cookie.filter(|id| is_valid_session_id(id))
            && self.sessions.contains(id).await
        {
            return (id.to_string(), false);
        }

        let id = self.sessions.open(Local::now().date_naive()).await;
        (id, true)
    }

    /// Opens a session whose calendar starts on `today`'s month.
    pub async fn open(&self, today: NaiveDate) -> String {
        self.sessions.open(today).await
    }

    /// Snapshot for rendering. The pending notice is consumed.
    pub async fn view(&self, id: &str) -> Result<BookingSession, AppError> {
        self.sessions
            .update(id, |session| {
                let snapshot = session.clone();
                session.take_notice();
                Ok(snapshot)
            })
            .await
    }

    /// Stores a message to show on the next render.
    pub async fn flash(&self, id: &str, message: &str) -> Result<(), AppError> {
        self.sessions
            .update(id, |session| {
                session.set_notice(message);
                Ok(())
            })
            .await
    }

    /// Chooses a villa and moves on to the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown villa ID, or
    /// [`AppError::Validation`] outside the selection step.
    pub async fn select_villa(&self, id: &str, villa_id: u32) -> Result<Step, AppError> {
        let villa = self.villas.get(villa_id).await?;
        self.sessions
            .update(id, |session| {
                session.select_villa(villa)?;
                session.advance()
            })
            .await
    }

    pub async fn back(&self, id: &str) -> Result<Step, AppError> {
        self.sessions.update(id, |session| session.back()).await
    }

    /// Moves forward from the calendar to the details step.
    pub async fn advance(&self, id: &str) -> Result<Step, AppError> {
        self.sessions.update(id, |session| session.advance()).await
    }

    pub async fn prev_month(&self, id: &str) -> Result<MonthCursor, AppError> {
        self.sessions.update(id, |session| session.prev_month()).await
    }

    pub async fn next_month(&self, id: &str) -> Result<MonthCursor, AppError> {
        self.sessions.update(id, |session| session.next_month()).await
    }

    /// Applies one click on a calendar day (`month` is zero-based).
    pub async fn select_date(
        &self,
        id: &str,
        day: u32,
        month: u32,
        year: i32,
    ) -> Result<(), AppError> {
        self.sessions
            .update(id, |session| session.select_date(day, month, year))
            .await
    }

    pub async fn set_guests(&self, id: &str, adults: u32, children: u32) -> Result<(), AppError> {
        self.sessions
            .update(id, |session| session.set_guests(adults, children))
            .await
    }

    /// Saves the guest form and sends the reservation request.
    ///
    /// The form is kept even when the send fails, so the details step can be
    /// shown again with everything the guest typed. The send and the outcome
    /// update run on their own task: a dropped request still settles the
    /// session instead of leaving it in flight.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if a required guest field is empty
    /// - [`AppError::Conflict`] if a send for this session is already running
    /// - [`AppError::Delivery`] if the notification could not be delivered
    /// - [`AppError::NotFound`] if the session expired while sending
    pub async fn submit(
        &self,
        id: &str,
        form: GuestFormData,
    ) -> Result<DeliveryReceipt, AppError> {
        let payload = self
            .sessions
            .update(id, |session| {
                session.update_form(form)?;
                session.begin_submission()
            })
            .await?;

        let sessions = Arc::clone(&self.sessions);
        let reservations = Arc::clone(&self.reservations);
        let id = id.to_string();

        tokio::spawn(async move { deliver(&sessions, &reservations, &id, payload).await })
            .await
            .map_err(|e| {
                error!(error = %e, "Reservation delivery task failed");
                AppError::internal("Reservation delivery task failed", json!({}))
            })?
    }

    /// Starts over from the confirmation step.
    pub async fn reset(&self, id: &str) -> Result<(), AppError> {
        let today = Local::now().date_naive();
        self.sessions
            .update(id, move |session| session.reset(today))
            .await
    }
}

/// Sends `payload` and records the outcome on session `id`.
async fn deliver(
    sessions: &InMemorySessionStore,
    reservations: &ReservationService,
    id: &str,
    payload: ReservationPayload,
) -> Result<DeliveryReceipt, AppError> {
    match reservations.send(&payload).await {
        Ok(receipt) => {
            let recorded = receipt.clone();
            if let Err(e) = sessions
                .update(id, move |session| session.complete_submission(recorded))
                .await
            {
                warn!(
                    message_id = %receipt.message_id,
                    villa = %payload.villa_name,
                    error = %e,
                    "Reservation delivered but the session is gone"
                );
                return Err(e);
            }
            debug!(message_id = %receipt.message_id, "Booking confirmed");
            Ok(receipt)
        }
        Err(e) => {
            let notice = failure_notice(&e);
            if let Err(record_err) = sessions
                .update(id, |session| session.fail_submission(notice))
                .await
            {
                warn!(error = %record_err, "Could not record failed submission");
            }
            Err(e)
        }
    }
}

fn failure_notice(error: &AppError) -> String {
    match error {
        AppError::Delivery { .. } => format!(
            "We could not send your request ({}). Your details are saved, please try again.",
            error.message()
        ),
        _ => error.message().to_string(),
    }
}
