//! Calendar primitives: validated days and month grids.
//!
//! Months are zero-based (`0` = January, `11` = December) throughout the
//! reservation flow, matching the month cursor carried by each booking session.
//! Weekdays are indexed from Sunday (`0`) to Saturday (`6`).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Column headers for a Sunday-first week.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Errors raised when a month or day does not exist on the civil calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Month must be between 0 and 11, got {0}")]
    InvalidMonth(u32),

    #[error("Day {day} does not exist in {} {year}", month_label(.month))]
    InvalidDay { day: u32, month: u32, year: i32 },

    #[error("Year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}

/// English name of a zero-based month, or `"?"` when out of range.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize).copied().unwrap_or("?")
}

fn month_label(month: &u32) -> &'static str {
    month_name(*month)
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a zero-based month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month > 11`.
pub fn days_in_month(month: u32, year: i32) -> Result<u32, CalendarError> {
    match month {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => Ok(31),
        3 | 5 | 8 | 10 => Ok(30),
        1 if is_leap_year(year) => Ok(29),
        1 => Ok(28),
        _ => Err(CalendarError::InvalidMonth(month)),
    }
}

/// Weekday of the first day of a zero-based month, `0` = Sunday.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] for `month > 11` and
/// [`CalendarError::YearOutOfRange`] for years chrono cannot represent.
pub fn first_weekday_of_month(month: u32, year: i32) -> Result<u32, CalendarError> {
    if month > 11 {
        return Err(CalendarError::InvalidMonth(month));
    }

    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .ok_or(CalendarError::YearOutOfRange(year))
}

/// A single existing calendar date.
///
/// Ordering is chronological, so range comparisons never depend on how the
/// value was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Builds a day from a grid position.
    ///
    /// # Errors
    ///
    /// Returns a [`CalendarError`] if the month is out of range or the day
    /// does not exist in that month (e.g. February 30).
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self, CalendarError> {
        let last = days_in_month(month, year)?;
        if day == 0 || day > last {
            return Err(CalendarError::InvalidDay { day, month, year });
        }

        NaiveDate::from_ymd_opt(year, month + 1, day)
            .map(Self)
            .ok_or(CalendarError::YearOutOfRange(year))
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.0.month0()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Formats the day the way reservation emails and summaries show it,
    /// e.g. `"Tuesday, April 1, 2025"`.
    pub fn format_long(&self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }

    /// Short form used in calendar captions, e.g. `"Apr 1"`.
    pub fn format_short(&self) -> String {
        self.0.format("%b %-d").to_string()
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One month laid out as Sunday-first week rows.
///
/// Every row holds exactly seven cells; `None` marks padding before day 1
/// and after the last day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: u32,
    pub year: i32,
    pub weeks: Vec<[Option<u32>; 7]>,
}

impl MonthGrid {
    /// Number of non-empty cells.
    pub fn day_count(&self) -> usize {
        self.weeks.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Total number of cells including padding.
    pub fn cell_count(&self) -> usize {
        self.weeks.len() * 7
    }

    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// Lays out a zero-based month as week rows.
///
/// Exactly `first_weekday_of_month` blanks precede day 1 and the final row
/// is padded to seven cells.
///
/// # Errors
///
/// See [`days_in_month`] and [`first_weekday_of_month`].
pub fn compute_grid(month: u32, year: i32) -> Result<MonthGrid, CalendarError> {
    let total = days_in_month(month, year)?;
    let leading = first_weekday_of_month(month, year)?;

    let mut cells: Vec<Option<u32>> = std::iter::repeat_n(None, leading as usize)
        .chain((1..=total).map(Some))
        .collect();
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    let weeks = cells
        .chunks(7)
        .map(|chunk| {
            let mut row = [None; 7];
            row.copy_from_slice(chunk);
            row
        })
        .collect();

    Ok(MonthGrid { month, year, weeks })
}
