//! Email bodies for reservation requests.

use askama::Template;
use serde_json::json;

use crate::domain::entities::ReservationPayload;
use crate::error::AppError;

#[derive(Template)]
#[template(path = "email/reservation.html")]
struct ReservationHtml<'a> {
    r: &'a ReservationPayload,
}

#[derive(Template)]
#[template(path = "email/reservation.txt")]
struct ReservationText<'a> {
    r: &'a ReservationPayload,
}

/// A reservation email ready to hand to a mail provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders subject, HTML and plain-text bodies for a reservation.
///
/// Guest-supplied text is HTML-escaped in the HTML body.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if a template fails to render.
pub fn render_reservation_email(payload: &ReservationPayload) -> Result<RenderedEmail, AppError> {
    let html = ReservationHtml { r: payload }.render().map_err(|e| {
        AppError::internal("Failed to render email", json!({ "reason": e.to_string() }))
    })?;
    let text = ReservationText { r: payload }.render().map_err(|e| {
        AppError::internal("Failed to render email", json!({ "reason": e.to_string() }))
    })?;

    Ok(RenderedEmail {
        subject: payload.subject(),
        html,
        text,
    })
}
