//! Page templates and the view models they render.
//!
//! Templates stay free of logic: every label, CSS class and `selected` flag
//! is computed here from the [`BookingSession`].

use askama::Template;
use askama_web::WebTemplate;

use crate::domain::booking::{BookingSession, Step};
use crate::domain::calendar::{CalendarError, WEEKDAY_LABELS};
use crate::domain::entities::{GuestFormData, Prefix, Villa};
use crate::domain::guests::{ADULTS, CHILDREN};
use crate::domain::month_view::{DayMark, MonthPanel};

/// One entry of the progress bar.
pub struct ProgressStep {
    pub number: usize,
    pub title: &'static str,
    /// `"done"`, `"current"` or `"todo"`.
    pub state: &'static str,
}

fn progress(current: Step) -> Vec<ProgressStep> {
    Step::ALL
        .iter()
        .map(|step| ProgressStep {
            number: step.number(),
            title: step.title(),
            state: match step.number().cmp(&current.number()) {
                std::cmp::Ordering::Less => "done",
                std::cmp::Ordering::Equal => "current",
                std::cmp::Ordering::Greater => "todo",
            },
        })
        .collect()
}

/// An `<option>` of a `<select>`.
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

fn count_options(range: impl Iterator<Item = u8>, current: u8) -> Vec<ChoiceOption> {
    range
        .map(|n| ChoiceOption {
            value: n.to_string(),
            label: n.to_string(),
            selected: n == current,
        })
        .collect()
}

fn prefix_options(current: Prefix) -> Vec<ChoiceOption> {
    Prefix::ALL
        .iter()
        .map(|prefix| ChoiceOption {
            value: prefix.as_str().to_string(),
            label: match prefix {
                Prefix::None => "-".to_string(),
                other => other.as_str().to_string(),
            },
            selected: *prefix == current,
        })
        .collect()
}

fn plural(n: i64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

/// Villa, dates and party shown on the details and confirmation steps.
pub struct StaySummary {
    pub villa_name: String,
    pub price: String,
    pub arrival: String,
    pub departure: String,
    pub nights: String,
    pub guests: String,
}

impl StaySummary {
    fn new(session: &BookingSession) -> Self {
        let range = session.date_range();
        let guests = session.guests();
        let mut party = plural(i64::from(guests.adults()), "adult", "adults");
        if guests.children() > 0 {
            party.push_str(", ");
            party.push_str(&plural(i64::from(guests.children()), "child", "children"));
        }

        Self {
            villa_name: session
                .selected_villa()
                .map(|v| v.name.clone())
                .unwrap_or_default(),
            price: session
                .selected_villa()
                .map(|v| v.price.clone())
                .unwrap_or_default(),
            arrival: range.arrival().map(|d| d.format_long()).unwrap_or_default(),
            departure: range
                .departure()
                .map(|d| d.format_long())
                .unwrap_or_default(),
            nights: range
                .nights()
                .map(|n| plural(n, "night", "nights"))
                .unwrap_or_default(),
            guests: party,
        }
    }
}

// ── Selection ──────────────────────────────────────────────────────────────

pub struct VillaCard {
    pub villa: Villa,
    pub selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "booking_selection.html")]
pub struct SelectionPage {
    pub progress: Vec<ProgressStep>,
    pub notice: String,
    pub villas: Vec<VillaCard>,
}

impl SelectionPage {
    pub fn new(session: &BookingSession, villas: Vec<Villa>, notice: String) -> Self {
        let selected_id = session.selected_villa().map(|v| v.id);
        Self {
            progress: progress(Step::Selection),
            notice,
            villas: villas
                .into_iter()
                .map(|villa| VillaCard {
                    selected: Some(villa.id) == selected_id,
                    villa,
                })
                .collect(),
        }
    }
}

// ── Calendar ───────────────────────────────────────────────────────────────

/// One calendar cell; `blank` cells are leading or trailing padding.
pub struct CellView {
    pub blank: bool,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub class: &'static str,
    pub label: String,
}

impl CellView {
    fn blank() -> Self {
        Self {
            blank: true,
            day: 0,
            month: 0,
            year: 0,
            class: "day blank",
            label: String::new(),
        }
    }
}

pub struct PanelView {
    pub title: String,
    pub weeks: Vec<Vec<CellView>>,
}

impl From<&MonthPanel> for PanelView {
    fn from(panel: &MonthPanel) -> Self {
        let weeks = panel
            .weeks
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| match cell {
                        Some(cell) => CellView {
                            blank: false,
                            day: cell.date.day(),
                            month: cell.date.month(),
                            year: cell.date.year(),
                            class: match cell.mark {
                                DayMark::Plain => "day",
                                DayMark::Arrival => "day arrival",
                                DayMark::Departure => "day departure",
                                DayMark::InRange => "day in-range",
                            },
                            label: cell.date.format_long(),
                        },
                        None => CellView::blank(),
                    })
                    .collect()
            })
            .collect();

        Self {
            title: panel.title.clone(),
            weeks,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "booking_calendar.html")]
pub struct CalendarPage {
    pub progress: Vec<ProgressStep>,
    pub notice: String,
    pub villa_name: String,
    pub weekdays: [&'static str; 7],
    pub panels: Vec<PanelView>,
    pub arrival: String,
    pub departure: String,
    pub nights: String,
    pub hint: &'static str,
    pub adult_options: Vec<ChoiceOption>,
    pub child_options: Vec<ChoiceOption>,
    pub can_continue: bool,
}

impl CalendarPage {
    /// # Errors
    ///
    /// Fails only if month navigation has left the representable calendar.
    pub fn new(session: &BookingSession, notice: String) -> Result<Self, CalendarError> {
        let view = session.calendar_view()?;
        let range = session.date_range();
        let guests = session.guests();

        let hint = match (range.arrival(), range.departure()) {
            (None, _) => "Select your arrival date",
            (Some(_), None) => "Select your departure date",
            (Some(_), Some(_)) => "Click a new date to start over",
        };

        Ok(Self {
            progress: progress(Step::Calendar),
            notice,
            villa_name: session
                .selected_villa()
                .map(|v| v.name.clone())
                .unwrap_or_default(),
            weekdays: WEEKDAY_LABELS,
            panels: view.panels().into_iter().map(PanelView::from).collect(),
            arrival: range
                .arrival()
                .map(|d| d.format_long())
                .unwrap_or_else(|| "-".to_string()),
            departure: range
                .departure()
                .map(|d| d.format_long())
                .unwrap_or_else(|| "-".to_string()),
            nights: range
                .nights()
                .map(|n| plural(n, "night", "nights"))
                .unwrap_or_default(),
            hint,
            adult_options: count_options(ADULTS, guests.adults()),
            child_options: count_options(CHILDREN, guests.children()),
            can_continue: session.can_advance(),
        })
    }
}

// ── Details ────────────────────────────────────────────────────────────────

#[derive(Template, WebTemplate)]
#[template(path = "booking_details.html")]
pub struct DetailsPage {
    pub progress: Vec<ProgressStep>,
    pub notice: String,
    pub summary: StaySummary,
    pub prefix_options: Vec<ChoiceOption>,
    pub form: GuestFormData,
    pub submitting: bool,
}

impl DetailsPage {
    pub fn new(session: &BookingSession, notice: String) -> Self {
        Self {
            progress: progress(Step::Details),
            notice,
            summary: StaySummary::new(session),
            prefix_options: prefix_options(session.form().prefix),
            form: session.form().clone(),
            submitting: session.is_submitting(),
        }
    }
}

// ── Confirmation ───────────────────────────────────────────────────────────

#[derive(Template, WebTemplate)]
#[template(path = "booking_confirmation.html")]
pub struct ConfirmationPage {
    pub progress: Vec<ProgressStep>,
    pub notice: String,
    pub summary: StaySummary,
    pub guest_name: String,
    pub guest_email: String,
    pub message_id: String,
}

impl ConfirmationPage {
    pub fn new(session: &BookingSession, notice: String) -> Self {
        Self {
            progress: progress(Step::Confirmation),
            notice,
            summary: StaySummary::new(session),
            guest_name: session.form().full_name(),
            guest_email: session.form().email.clone(),
            message_id: session
                .receipt()
                .map(|r| r.message_id.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session_on_calendar() -> BookingSession {
        let mut session = BookingSession::new(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
        session
            .select_villa(Villa::new(2, "Villa Olivia", "", "€980 / night", 4, 2, ""))
            .unwrap();
        session.advance().unwrap();
        session
    }

    #[test]
    fn test_progress_states() {
        let states: Vec<&str> = progress(Step::Details).iter().map(|p| p.state).collect();
        assert_eq!(states, vec!["done", "done", "current", "todo"]);
    }

    #[test]
    fn test_calendar_page_marks_range() {
        let mut session = session_on_calendar();
        session.select_date(1, 3, 2024).unwrap();
        session.select_date(3, 3, 2024).unwrap();

        let page = CalendarPage::new(&session, String::new()).unwrap();

        assert_eq!(page.panels.len(), 2);
        assert_eq!(page.panels[0].title, "April 2024");
        assert_eq!(page.panels[1].title, "May 2024");
        let classes: Vec<&str> = page.panels[0]
            .weeks
            .iter()
            .flatten()
            .filter(|c| !c.blank && c.day <= 4)
            .map(|c| c.class)
            .collect();
        assert_eq!(
            classes,
            vec!["day arrival", "day in-range", "day departure", "day"]
        );
        assert_eq!(page.nights, "2 nights");
        assert!(page.can_continue);
    }

    #[test]
    fn test_calendar_page_guest_options() {
        let page = CalendarPage::new(&session_on_calendar(), String::new()).unwrap();

        assert_eq!(page.adult_options.len(), 6);
        assert_eq!(page.child_options.len(), 7);
        let selected: Vec<&str> = page
            .adult_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, vec!["2"]);
        assert_eq!(page.hint, "Select your arrival date");
        assert!(!page.can_continue);
    }

    #[test]
    fn test_summary_party_wording() {
        let mut session = session_on_calendar();
        session.set_guests(1, 1).unwrap();
        session.select_date(1, 3, 2024).unwrap();
        session.select_date(2, 3, 2024).unwrap();

        let summary = StaySummary::new(&session);

        assert_eq!(summary.guests, "1 adult, 1 child");
        assert_eq!(summary.nights, "1 night");
        assert_eq!(summary.arrival, "Monday, April 1, 2024");
    }

    #[test]
    fn test_prefix_options_select_current() {
        let options = prefix_options(Prefix::Dr);

        assert_eq!(options[0].value, "");
        assert!(options.iter().any(|o| o.value == "Dr" && o.selected));
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn test_selection_page_renders_villas() {
        let session = BookingSession::new(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
        let villas = vec![Villa::new(1, "Villa Aurora", "Cliffside", "€1,450 / night", 6, 3, "")];

        let html = SelectionPage::new(&session, villas, String::new())
            .render()
            .unwrap();

        assert!(html.contains("Villa Aurora"));
        assert!(html.contains("€1,450 / night"));
        assert!(html.contains("action=\"/reservations/villa\""));
    }
}
