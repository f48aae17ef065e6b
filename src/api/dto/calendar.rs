//! DTOs for the month grid endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::calendar::{MonthGrid, WEEKDAY_LABELS, is_leap_year, month_name};

/// Query parameters for `GET /api/calendar`.
#[derive(Debug, Deserialize, Validate)]
pub struct CalendarQuery {
    /// Zero-based month (0 = January).
    #[validate(range(max = 11, message = "month must be between 0 and 11"))]
    pub month: u32,

    pub year: i32,
}

/// One month laid out as Sunday-first weeks; `null` cells are padding.
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub month: u32,
    pub year: i32,
    pub title: String,
    pub month_name: &'static str,
    pub leap_year: bool,
    pub days_in_month: usize,
    pub first_weekday: u32,
    pub weekdays: [&'static str; 7],
    pub weeks: Vec<[Option<u32>; 7]>,
}

impl From<MonthGrid> for CalendarResponse {
    fn from(grid: MonthGrid) -> Self {
        let first_weekday = grid
            .weeks
            .first()
            .and_then(|week| week.iter().position(Option::is_some))
            .unwrap_or(0) as u32;

        Self {
            month: grid.month,
            year: grid.year,
            title: grid.title(),
            month_name: month_name(grid.month),
            leap_year: is_leap_year(grid.year),
            days_in_month: grid.day_count(),
            first_weekday,
            weekdays: WEEKDAY_LABELS,
            weeks: grid.weeks,
        }
    }
}
