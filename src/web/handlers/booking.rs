//! Booking flow page and form actions.
//!
//! Every step lives under one URL. `GET /reservations` renders whatever step
//! the visitor's session is on; each form posts to an action route that
//! updates the session and redirects back with `303 See Other`.

use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::views::{CalendarPage, ConfirmationPage, DetailsPage, SelectionPage};
use crate::domain::booking::Step;
use crate::domain::entities::GuestFormData;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::session::SessionId;
use crate::web::routes::BOOKING_PATH;

/// Renders the current step.
///
/// # Endpoint
///
/// `GET /reservations`
///
/// A notice left by the previous action is shown once and then cleared.
pub async fn booking_page_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Response, AppError> {
    let session = match st.booking_service.view(&id).await {
        Ok(session) => session,
        // Expired between the middleware and here; start over
        Err(AppError::NotFound { .. }) => return Ok(Redirect::to(BOOKING_PATH).into_response()),
        Err(e) => return Err(e),
    };
    let notice = session.notice().unwrap_or_default().to_string();

    let page = match session.step() {
        Step::Selection => {
            let villas = st.villa_service.list().await?;
            SelectionPage::new(&session, villas, notice).into_response()
        }
        Step::Calendar => CalendarPage::new(&session, notice)?.into_response(),
        Step::Details => DetailsPage::new(&session, notice).into_response(),
        Step::Confirmation => ConfirmationPage::new(&session, notice).into_response(),
    };

    Ok(([(CACHE_CONTROL, "no-store")], page).into_response())
}

#[derive(Debug, Deserialize)]
pub struct VillaForm {
    pub villa_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct DateClickForm {
    pub day: u32,
    /// Zero-based.
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct GuestsForm {
    pub adults: u32,
    pub children: u32,
}

/// `POST /reservations/villa` - choose a villa and open the calendar.
pub async fn select_villa_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    form: Result<Form<VillaForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let result = match parse_form(form) {
        Ok(form) => st.booking_service.select_villa(&id, form.villa_id).await,
        Err(e) => Err(e),
    };
    settle(&st, &id, result).await
}

/// `POST /reservations/back`
pub async fn back_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Redirect, AppError> {
    let result = st.booking_service.back(&id).await;
    settle(&st, &id, result).await
}

/// `POST /reservations/calendar/prev`
pub async fn prev_month_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Redirect, AppError> {
    let result = st.booking_service.prev_month(&id).await;
    settle(&st, &id, result).await
}

/// `POST /reservations/calendar/next`
pub async fn next_month_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Redirect, AppError> {
    let result = st.booking_service.next_month(&id).await;
    settle(&st, &id, result).await
}

/// `POST /reservations/calendar/select` - one click on a calendar day.
pub async fn select_date_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    form: Result<Form<DateClickForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let result = match parse_form(form) {
        Ok(click) => {
            st.booking_service
                .select_date(&id, click.day, click.month, click.year)
                .await
        }
        Err(e) => Err(e),
    };
    settle(&st, &id, result).await
}

/// `POST /reservations/guests`
pub async fn guests_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    form: Result<Form<GuestsForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let result = match parse_form(form) {
        Ok(guests) => {
            st.booking_service
                .set_guests(&id, guests.adults, guests.children)
                .await
        }
        Err(e) => Err(e),
    };
    settle(&st, &id, result).await
}

/// `POST /reservations/continue` - calendar to details.
pub async fn continue_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Redirect, AppError> {
    let result = st.booking_service.advance(&id).await;
    settle(&st, &id, result).await
}

/// `POST /reservations/details` - save the guest form and send the request.
///
/// On success the next render shows the confirmation step. On failure the
/// details step is shown again with the entered data and a notice.
pub async fn submit_details_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    form: Result<Form<GuestFormData>, FormRejection>,
) -> Result<Redirect, AppError> {
    let result = match parse_form(form) {
        Ok(form) => st.booking_service.submit(&id, form).await,
        Err(e) => Err(e),
    };
    settle(&st, &id, result).await
}

/// `POST /reservations/reset` - confirmation back to an empty selection.
pub async fn reset_handler(
    State(st): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Result<Redirect, AppError> {
    let result = st.booking_service.reset(&id).await;
    settle(&st, &id, result).await
}

fn parse_form<T>(form: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    form.map(|Form(inner)| inner).map_err(|rejection| {
        AppError::bad_request(
            "The form could not be read, please try again",
            json!({ "reason": rejection.body_text() }),
        )
    })
}

/// Turns an action result into a redirect back to the booking page.
///
/// User-facing errors become a one-shot notice. Delivery failures already
/// left their notice in the session. Only internal errors are returned.
async fn settle<T>(
    st: &AppState,
    id: &str,
    result: Result<T, AppError>,
) -> Result<Redirect, AppError> {
    match result {
        Ok(_) | Err(AppError::Delivery { .. }) => {}
        Err(e @ AppError::Internal { .. }) => return Err(e),
        Err(e) => {
            tracing::debug!(error = %e, "Booking action rejected");
            if let Err(flash_err) = st.booking_service.flash(id, &notice_for(&e)).await {
                tracing::debug!(error = %flash_err, "Could not store notice");
            }
        }
    }
    Ok(Redirect::to(BOOKING_PATH))
}

/// Message shown to the visitor for a rejected action.
fn notice_for(e: &AppError) -> String {
    let missing: Vec<String> = e
        .details()
        .get("fields")
        .and_then(|fields| fields.as_array())
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f.as_str())
                .map(|f| f.replace('_', " "))
                .collect()
        })
        .unwrap_or_default();

    if missing.is_empty() {
        e.message().to_string()
    } else {
        format!("Please fill in: {}", missing.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_lists_missing_fields() {
        let e = AppError::bad_request(
            "Validation failed",
            json!({ "fields": ["email", "first_name"] }),
        );
        assert_eq!(notice_for(&e), "Please fill in: email, first name");
    }

    #[test]
    fn test_notice_falls_back_to_message() {
        let e = AppError::bad_request("Choose a villa to continue", json!({ "step": "selection" }));
        assert_eq!(notice_for(&e), "Choose a villa to continue");
    }
}
