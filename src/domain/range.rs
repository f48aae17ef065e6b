//! Arrival/departure selection driven by calendar clicks.

use serde::Serialize;

use super::calendar::{CalendarDay, CalendarError};

/// Which endpoint the next click will set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    AwaitingArrival,
    AwaitingDeparture,
}

/// The stay being selected.
///
/// Both endpoints are private: the only way to change a range is
/// [`DateRange::select`], which keeps `departure > arrival` whenever both are
/// present. Same-day stays are not representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    arrival: Option<CalendarDay>,
    departure: Option<CalendarDay>,
}

impl DateRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrival(&self) -> Option<CalendarDay> {
        self.arrival
    }

    pub fn departure(&self) -> Option<CalendarDay> {
        self.departure
    }

    /// Both endpoints are chosen.
    pub fn is_complete(&self) -> bool {
        self.arrival.is_some() && self.departure.is_some()
    }

    /// A completed range counts as awaiting arrival: the next click restarts.
    pub fn phase(&self) -> SelectionPhase {
        match (self.arrival, self.departure) {
            (Some(_), None) => SelectionPhase::AwaitingDeparture,
            _ => SelectionPhase::AwaitingArrival,
        }
    }

    /// Applies one click.
    ///
    /// - no arrival yet, or a complete range: the click starts a new range
    /// - arrival only, click strictly later: the click becomes the departure
    /// - arrival only, click on or before it: the click re-anchors the arrival
    pub fn select(self, clicked: CalendarDay) -> Self {
        match (self.arrival, self.departure) {
            (Some(arrival), None) if clicked > arrival => Self {
                arrival: Some(arrival),
                departure: Some(clicked),
            },
            _ => Self {
                arrival: Some(clicked),
                departure: None,
            },
        }
    }

    /// True iff the range is complete and `day` lies within it, endpoints
    /// included.
    pub fn contains(&self, day: CalendarDay) -> bool {
        match (self.arrival, self.departure) {
            (Some(arrival), Some(departure)) => arrival <= day && day <= departure,
            _ => false,
        }
    }

    /// Nights between arrival and departure for a complete range.
    pub fn nights(&self) -> Option<i64> {
        match (self.arrival, self.departure) {
            (Some(arrival), Some(departure)) => {
                Some((departure.date() - arrival.date()).num_days())
            }
            _ => None,
        }
    }
}

/// Applies a click on `(day, month, year)` to `state`.
///
/// # Errors
///
/// Returns a [`CalendarError`] when the clicked position is not a real date;
/// `state` is not consumed in that case.
pub fn select_date(
    day: u32,
    month: u32,
    year: i32,
    state: DateRange,
) -> Result<DateRange, CalendarError> {
    let clicked = CalendarDay::new(day, month, year)?;
    Ok(state.select(clicked))
}

/// Whether `(day, month, year)` should be highlighted as part of `state`.
///
/// Positions that are not real dates are never in range.
pub fn is_in_range(day: u32, month: u32, year: i32, state: &DateRange) -> bool {
    CalendarDay::new(day, month, year).is_ok_and(|d| state.contains(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march(day: u32) -> CalendarDay {
        CalendarDay::new(day, 2, 2025).unwrap()
    }

    #[test]
    fn test_click_sequence_scenario() {
        let state = DateRange::new();

        let state = state.select(march(10));
        assert_eq!(state.arrival(), Some(march(10)));
        assert_eq!(state.departure(), None);

        let state = state.select(march(15));
        assert_eq!(state.arrival(), Some(march(10)));
        assert_eq!(state.departure(), Some(march(15)));

        let state = state.select(march(5));
        assert_eq!(state.arrival(), Some(march(5)));
        assert_eq!(state.departure(), None);

        let state = state.select(march(20));
        assert_eq!(state.arrival(), Some(march(5)));
        assert_eq!(state.departure(), Some(march(20)));

        let state = state.select(march(25));
        assert_eq!(state.arrival(), Some(march(25)));
        assert_eq!(state.departure(), None);
    }

    #[test]
    fn test_earlier_click_reanchors_arrival() {
        let state = DateRange::new().select(march(10)).select(march(4));

        assert_eq!(state.arrival(), Some(march(4)));
        assert_eq!(state.phase(), SelectionPhase::AwaitingDeparture);
    }

    #[test]
    fn test_same_day_click_never_completes_range() {
        let state = DateRange::new().select(march(10)).select(march(10));

        assert_eq!(state.arrival(), Some(march(10)));
        assert_eq!(state.departure(), None);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_departure_across_month_boundary() {
        let arrival = CalendarDay::new(28, 2, 2025).unwrap();
        let departure = CalendarDay::new(3, 3, 2025).unwrap();
        let state = DateRange::new().select(arrival).select(departure);

        assert!(state.is_complete());
        assert_eq!(state.nights(), Some(6));
    }

    #[test]
    fn test_invariant_holds_for_click_sequences() {
        // Deterministic pseudo-random walk over two months of clicks
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut state = DateRange::new();

        for _ in 0..5_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let month = 2 + (seed % 2) as u32;
            let day = 1 + ((seed >> 8) % 30) as u32;
            state = select_date(day, month, 2025, state).unwrap();

            match (state.arrival(), state.departure()) {
                (None, None) | (Some(_), None) => {}
                (Some(a), Some(d)) => assert!(d > a),
                (None, Some(_)) => panic!("departure without arrival"),
            }
        }
    }

    #[test]
    fn test_select_date_rejects_invalid_position() {
        let state = DateRange::new().select(march(10));

        assert!(select_date(31, 3, 2025, state).is_err());
        assert_eq!(state.arrival(), Some(march(10)));
    }

    #[test]
    fn test_is_in_range_inclusive() {
        let state = DateRange::new().select(march(10)).select(march(15));

        assert!(is_in_range(10, 2, 2025, &state));
        assert!(is_in_range(12, 2, 2025, &state));
        assert!(is_in_range(15, 2, 2025, &state));
        assert!(!is_in_range(9, 2, 2025, &state));
        assert!(!is_in_range(16, 2, 2025, &state));
    }

    #[test]
    fn test_is_in_range_requires_complete_range() {
        let state = DateRange::new().select(march(10));

        assert!(!is_in_range(10, 2, 2025, &state));
        assert_eq!(state.nights(), None);
    }
}
