//! Booking step machine.
//!
//! A [`BookingSession`] is the aggregate root of one reservation flow. It owns
//! every piece of state the four steps share and is the only place where step
//! transitions happen:
//!
//! ```text
//! selection ──▶ calendar ──▶ details ──▶ confirmation
//!     ▲            │  ▲         │             │
//!     └── back ────┘  └─ back ──┘             │
//!     ▲                                       │
//!     └──────────────── reset ────────────────┘
//! ```
//!
//! Every operation checks that it belongs to the current step. A rejected
//! operation returns [`AppError::Validation`] and leaves the session untouched.

use chrono::NaiveDate;
use serde_json::json;
use validator::Validate;

use super::calendar::{CalendarDay, CalendarError};
use super::entities::{DeliveryReceipt, GuestFormData, ReservationPayload, Villa};
use super::guests::GuestCount;
use super::month_view::{DualMonthView, MonthCursor};
use super::range::DateRange;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Selection,
    Calendar,
    Details,
    Confirmation,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::Selection,
        Step::Calendar,
        Step::Details,
        Step::Confirmation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Selection => "selection",
            Step::Calendar => "calendar",
            Step::Details => "details",
            Step::Confirmation => "confirmation",
        }
    }

    /// One-based position shown in the progress bar.
    pub fn number(&self) -> usize {
        match self {
            Step::Selection => 1,
            Step::Calendar => 2,
            Step::Details => 3,
            Step::Confirmation => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Selection => "Choose your villa",
            Step::Calendar => "Select dates",
            Step::Details => "Guest details",
            Step::Confirmation => "Request sent",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a notification send is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Idle,
    InFlight,
}

#[derive(Debug, Clone)]
pub struct BookingSession {
    step: Step,
    selected_villa: Option<Villa>,
    date_range: DateRange,
    guests: GuestCount,
    form: GuestFormData,
    cursor: MonthCursor,
    submission: Submission,
    receipt: Option<DeliveryReceipt>,
    notice: Option<String>,
}

impl BookingSession {
    /// Opens a session with defaults; the calendar starts on `today`'s month.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: Step::Selection,
            selected_villa: None,
            date_range: DateRange::new(),
            guests: GuestCount::default(),
            form: GuestFormData::default(),
            cursor: MonthCursor::containing(today),
            submission: Submission::Idle,
            receipt: None,
            notice: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selected_villa(&self) -> Option<&Villa> {
        self.selected_villa.as_ref()
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    pub fn guests(&self) -> GuestCount {
        self.guests
    }

    pub fn form(&self) -> &GuestFormData {
        &self.form
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == Submission::InFlight
    }

    pub fn receipt(&self) -> Option<&DeliveryReceipt> {
        self.receipt.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Stores a message to show once on the next render.
    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Both calendar panels for the current cursor.
    pub fn calendar_view(&self) -> Result<DualMonthView, CalendarError> {
        DualMonthView::build(self.cursor, &self.date_range)
    }

    /// Whether the forward control of the current step is enabled.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Selection => self.selected_villa.is_some(),
            Step::Calendar => self.date_range.is_complete(),
            Step::Details => !self.is_submitting() && self.form.validate().is_ok(),
            Step::Confirmation => false,
        }
    }

    // ── Selection ──────────────────────────────────────────────────────────

    pub fn select_villa(&mut self, villa: Villa) -> Result<(), AppError> {
        self.require_step(Step::Selection, "choose a villa")?;
        tracing::debug!(villa_id = villa.id, "Villa selected");
        self.selected_villa = Some(villa);
        Ok(())
    }

    // ── Calendar ───────────────────────────────────────────────────────────

    /// Applies one click on a calendar day.
    pub fn select_date(&mut self, day: u32, month: u32, year: i32) -> Result<(), AppError> {
        self.require_step(Step::Calendar, "select dates")?;
        let clicked = CalendarDay::new(day, month, year)?;
        self.date_range = self.date_range.select(clicked);
        tracing::debug!(
            arrival = ?self.date_range.arrival(),
            departure = ?self.date_range.departure(),
            "Date range updated"
        );
        Ok(())
    }

    pub fn prev_month(&mut self) -> Result<MonthCursor, AppError> {
        self.require_step(Step::Calendar, "change month")?;
        self.cursor = self.cursor.prev();
        Ok(self.cursor)
    }

    pub fn next_month(&mut self) -> Result<MonthCursor, AppError> {
        self.require_step(Step::Calendar, "change month")?;
        self.cursor = self.cursor.next();
        Ok(self.cursor)
    }

    pub fn set_adults(&mut self, n: u32) -> Result<(), AppError> {
        self.require_step(Step::Calendar, "change guests")?;
        self.guests.set_adults(n)?;
        Ok(())
    }

    pub fn set_children(&mut self, n: u32) -> Result<(), AppError> {
        self.require_step(Step::Calendar, "change guests")?;
        self.guests.set_children(n)?;
        Ok(())
    }

    /// Sets both counters, or neither if either value is out of range.
    pub fn set_guests(&mut self, adults: u32, children: u32) -> Result<(), AppError> {
        self.require_step(Step::Calendar, "change guests")?;
        let mut next = self.guests;
        next.set_adults(adults)?;
        next.set_children(children)?;
        self.guests = next;
        Ok(())
    }

    // ── Details ────────────────────────────────────────────────────────────

    pub fn update_form(&mut self, form: GuestFormData) -> Result<(), AppError> {
        self.require_step(Step::Details, "edit guest details")?;
        self.require_idle()?;
        self.form = form;
        Ok(())
    }

    /// Marks a send as in flight and returns the payload to deliver.
    ///
    /// # Errors
    ///
    /// - [`AppError::Conflict`] while an earlier send is still outstanding
    /// - [`AppError::Validation`] when a required guest field is empty
    pub fn begin_submission(&mut self) -> Result<ReservationPayload, AppError> {
        self.require_step(Step::Details, "submit a reservation")?;
        self.require_idle()?;
        self.form.validate()?;

        let (Some(villa), Some(arrival), Some(departure)) = (
            self.selected_villa.as_ref(),
            self.date_range.arrival(),
            self.date_range.departure(),
        ) else {
            return Err(AppError::bad_request(
                "Villa and dates must be selected before submitting",
                json!({ "step": self.step.as_str() }),
            ));
        };

        let payload = ReservationPayload::new(villa, arrival, departure, self.guests, &self.form);
        self.submission = Submission::InFlight;
        self.notice = None;
        tracing::debug!(villa = %payload.villa_name, "Submission started");
        Ok(payload)
    }

    /// Records a successful send and enters the confirmation step.
    pub fn complete_submission(&mut self, receipt: DeliveryReceipt) -> Result<(), AppError> {
        self.require_in_flight()?;
        self.submission = Submission::Idle;
        self.receipt = Some(receipt);
        self.step = Step::Confirmation;
        tracing::debug!("Submission confirmed");
        Ok(())
    }

    /// Records a failed send. The session stays on the details step with the
    /// form intact.
    pub fn fail_submission(&mut self, message: impl Into<String>) -> Result<(), AppError> {
        self.require_in_flight()?;
        self.submission = Submission::Idle;
        self.notice = Some(message.into());
        Ok(())
    }

    // ── Navigation ─────────────────────────────────────────────────────────

    /// Moves forward from selection or calendar.
    ///
    /// The details step only advances through a successful submission.
    pub fn advance(&mut self) -> Result<Step, AppError> {
        let next = match self.step {
            Step::Selection if self.selected_villa.is_some() => Step::Calendar,
            Step::Selection => {
                return Err(AppError::bad_request(
                    "Choose a villa to continue",
                    json!({ "step": self.step.as_str() }),
                ));
            }
            Step::Calendar if self.date_range.is_complete() => Step::Details,
            Step::Calendar => {
                return Err(AppError::bad_request(
                    "Select both arrival and departure dates to continue",
                    json!({
                        "step": self.step.as_str(),
                        "arrival": self.date_range.arrival().map(|d| d.to_string()),
                    }),
                ));
            }
            Step::Details => {
                return Err(AppError::bad_request(
                    "Submit the guest details to continue",
                    json!({ "step": self.step.as_str() }),
                ));
            }
            Step::Confirmation => {
                return Err(AppError::bad_request(
                    "The reservation request has already been sent",
                    json!({ "step": self.step.as_str() }),
                ));
            }
        };

        tracing::debug!(from = %self.step, to = %next, "Step advanced");
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> Result<Step, AppError> {
        let previous = match self.step {
            Step::Calendar => Step::Selection,
            Step::Details => {
                self.require_idle()?;
                Step::Calendar
            }
            Step::Selection | Step::Confirmation => {
                return Err(AppError::bad_request(
                    format!("Cannot go back from the {} step", self.step),
                    json!({ "step": self.step.as_str() }),
                ));
            }
        };

        tracing::debug!(from = %self.step, to = %previous, "Step went back");
        self.step = previous;
        Ok(previous)
    }

    /// Clears every field after a confirmed request; the calendar moves to
    /// `today`'s month.
    pub fn reset(&mut self, today: NaiveDate) -> Result<(), AppError> {
        self.require_step(Step::Confirmation, "start a new reservation")?;
        *self = Self::new(today);
        tracing::debug!("Session reset");
        Ok(())
    }

    fn require_step(&self, expected: Step, action: &str) -> Result<(), AppError> {
        if self.step == expected {
            return Ok(());
        }
        Err(AppError::bad_request(
            format!("Cannot {} on the {} step", action, self.step),
            json!({ "step": self.step.as_str(), "expected": expected.as_str() }),
        ))
    }

    fn require_idle(&self) -> Result<(), AppError> {
        if self.is_submitting() {
            return Err(AppError::conflict(
                "A reservation request is already being sent",
                json!({}),
            ));
        }
        Ok(())
    }

    fn require_in_flight(&self) -> Result<(), AppError> {
        if !self.is_submitting() {
            return Err(AppError::conflict("No reservation request is pending", json!({})));
        }
        Ok(())
    }
}
