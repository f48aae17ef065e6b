//! Two-month calendar view and month navigation.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::calendar::{CalendarDay, CalendarError, MonthGrid, compute_grid, month_name};
use super::range::DateRange;

/// Month shown in the left panel. The right panel always shows the month
/// after it.
///
/// Navigation is unbounded in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    month: u32,
    year: i32,
}

impl MonthCursor {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month > 11`.
    pub fn new(month: u32, year: i32) -> Result<Self, CalendarError> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { month, year })
    }

    /// Cursor on the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn prev(self) -> Self {
        if self.month == 0 {
            Self {
                month: 11,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 11 {
            Self {
                month: 0,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    /// e.g. `"April 2025"`.
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// How a day cell relates to the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMark {
    Plain,
    Arrival,
    Departure,
    InRange,
}

impl DayMark {
    fn for_day(day: CalendarDay, range: &DateRange) -> Self {
        if range.arrival() == Some(day) {
            DayMark::Arrival
        } else if range.departure() == Some(day) {
            DayMark::Departure
        } else if range.contains(day) {
            DayMark::InRange
        } else {
            DayMark::Plain
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: CalendarDay,
    pub mark: DayMark,
}

/// One rendered month: the grid with each day classified against the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPanel {
    pub cursor: MonthCursor,
    pub title: String,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthPanel {
    fn build(cursor: MonthCursor, range: &DateRange) -> Result<Self, CalendarError> {
        let MonthGrid { month, year, weeks } = compute_grid(cursor.month, cursor.year)?;

        let mut rows = Vec::with_capacity(weeks.len());
        for week in weeks {
            let mut row = [None; 7];
            for (slot, cell) in row.iter_mut().zip(week) {
                if let Some(day) = cell {
                    let date = CalendarDay::new(day, month, year)?;
                    *slot = Some(DayCell {
                        date,
                        mark: DayMark::for_day(date, range),
                    });
                }
            }
            rows.push(row);
        }

        Ok(Self {
            cursor,
            title: cursor.title(),
            weeks: rows,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }
}

/// Current month and the next one, both drawn from the same [`DateRange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DualMonthView {
    pub left: MonthPanel,
    pub right: MonthPanel,
}

impl DualMonthView {
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] when navigation has left the
    /// representable calendar.
    pub fn build(cursor: MonthCursor, range: &DateRange) -> Result<Self, CalendarError> {
        Ok(Self {
            left: MonthPanel::build(cursor, range)?,
            right: MonthPanel::build(cursor.next(), range)?,
        })
    }

    pub fn panels(&self) -> [&MonthPanel; 2] {
        [&self.left, &self.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(month: u32, year: i32) -> MonthCursor {
        MonthCursor::new(month, year).unwrap()
    }

    #[test]
    fn test_next_rolls_year_over() {
        assert_eq!(cursor(11, 2024).next(), cursor(0, 2025));
        assert_eq!(cursor(4, 2024).next(), cursor(5, 2024));
    }

    #[test]
    fn test_prev_rolls_year_back() {
        assert_eq!(cursor(0, 2025).prev(), cursor(11, 2024));
        assert_eq!(cursor(4, 2025).prev(), cursor(3, 2025));
    }

    #[test]
    fn test_navigation_is_unbounded() {
        let mut c = cursor(0, 2025);
        for _ in 0..240 {
            c = c.prev();
        }
        assert_eq!(c, cursor(0, 2005));
    }

    #[test]
    fn test_cursor_rejects_invalid_month() {
        assert_eq!(
            MonthCursor::new(12, 2025),
            Err(CalendarError::InvalidMonth(12))
        );
    }

    #[test]
    fn test_right_panel_is_following_month() {
        let view = DualMonthView::build(cursor(11, 2024), &DateRange::new()).unwrap();

        assert_eq!(view.left.title, "December 2024");
        assert_eq!(view.right.title, "January 2025");
        assert_eq!(view.right.cursor, cursor(0, 2025));
    }

    #[test]
    fn test_marks_follow_shared_range() {
        let arrival = CalendarDay::new(29, 3, 2025).unwrap();
        let departure = CalendarDay::new(2, 4, 2025).unwrap();
        let range = DateRange::new().select(arrival).select(departure);

        let view = DualMonthView::build(cursor(3, 2025), &range).unwrap();

        let mark_of = |panel: &MonthPanel, day: u32| {
            panel
                .days()
                .find(|c| c.date.day() == day)
                .map(|c| c.mark)
                .unwrap()
        };
        assert_eq!(mark_of(&view.left, 28), DayMark::Plain);
        assert_eq!(mark_of(&view.left, 29), DayMark::Arrival);
        assert_eq!(mark_of(&view.left, 30), DayMark::InRange);
        assert_eq!(mark_of(&view.right, 1), DayMark::InRange);
        assert_eq!(mark_of(&view.right, 2), DayMark::Departure);
        assert_eq!(mark_of(&view.right, 3), DayMark::Plain);
    }

    #[test]
    fn test_arrival_marked_before_range_completes() {
        let arrival = CalendarDay::new(10, 3, 2025).unwrap();
        let range = DateRange::new().select(arrival);

        let view = DualMonthView::build(cursor(3, 2025), &range).unwrap();

        let marked: Vec<_> = view
            .left
            .days()
            .filter(|c| c.mark != DayMark::Plain)
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].mark, DayMark::Arrival);
    }
}
