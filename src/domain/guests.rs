//! Adult and child counters for a stay.

use std::ops::RangeInclusive;

use serde::Serialize;
use thiserror::Error;

pub const ADULTS: RangeInclusive<u8> = 1..=6;
pub const CHILDREN: RangeInclusive<u8> = 0..=6;

pub const DEFAULT_ADULTS: u8 = 2;
pub const DEFAULT_CHILDREN: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuestCountError {
    #[error("Adults must be between 1 and 6, got {0}")]
    Adults(u32),

    #[error("Children must be between 0 and 6, got {0}")]
    Children(u32),
}

impl GuestCountError {
    pub fn field(&self) -> &'static str {
        match self {
            GuestCountError::Adults(_) => "adults",
            GuestCountError::Children(_) => "children",
        }
    }
}

/// Party size. Values outside the fixed option ranges are rejected, never
/// clamped, and leave the previous value in place.
///
/// Capacity against a villa's `max_guests` is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuestCount {
    adults: u8,
    children: u8,
}

impl Default for GuestCount {
    fn default() -> Self {
        Self {
            adults: DEFAULT_ADULTS,
            children: DEFAULT_CHILDREN,
        }
    }
}

impl GuestCount {
    pub fn adults(&self) -> u8 {
        self.adults
    }

    pub fn children(&self) -> u8 {
        self.children
    }

    pub fn total(&self) -> u8 {
        self.adults + self.children
    }

    pub fn set_adults(&mut self, n: u32) -> Result<(), GuestCountError> {
        self.adults = checked(n, &ADULTS).ok_or(GuestCountError::Adults(n))?;
        Ok(())
    }

    pub fn set_children(&mut self, n: u32) -> Result<(), GuestCountError> {
        self.children = checked(n, &CHILDREN).ok_or(GuestCountError::Children(n))?;
        Ok(())
    }
}

fn checked(n: u32, allowed: &RangeInclusive<u8>) -> Option<u8> {
    u8::try_from(n).ok().filter(|v| allowed.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let guests = GuestCount::default();
        assert_eq!(guests.adults(), 2);
        assert_eq!(guests.children(), 0);
    }

    #[test]
    fn test_set_adults_rejects_seven() {
        let mut guests = GuestCount::default();

        assert_eq!(guests.set_adults(7), Err(GuestCountError::Adults(7)));
        assert_eq!(guests.adults(), 2);
    }

    #[test]
    fn test_set_adults_rejects_zero() {
        let mut guests = GuestCount::default();

        assert!(guests.set_adults(0).is_err());
        assert_eq!(guests.adults(), 2);
    }

    #[test]
    fn test_set_children_bounds() {
        let mut guests = GuestCount::default();

        assert!(guests.set_children(0).is_ok());
        assert!(guests.set_children(6).is_ok());
        assert_eq!(guests.children(), 6);
        assert!(guests.set_children(7).is_err());
        assert!(guests.set_children(300).is_err());
        assert_eq!(guests.children(), 6);
    }

    #[test]
    fn test_every_allowed_value_is_accepted() {
        let mut guests = GuestCount::default();
        for n in 1..=6 {
            guests.set_adults(n).unwrap();
            assert_eq!(u32::from(guests.adults()), n);
        }
        for n in 0..=6 {
            guests.set_children(n).unwrap();
            assert_eq!(u32::from(guests.children()), n);
        }
        assert_eq!(guests.total(), 12);
    }
}
