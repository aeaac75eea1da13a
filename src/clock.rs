//! Injectable source of "today".
//!
//! Age and employment-duration arithmetic read the date through a [`Clock`]
//! so a run can be reproduced exactly in tests.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date.
pub trait Clock {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
///
/// # Example
///
/// ```
/// use subsidy_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    /// Creates a clock pinned to `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(FixedClock::new(date).today(), date);
    }

    #[test]
    fn test_clock_usable_through_reference() {
        fn read(clock: &dyn Clock) -> NaiveDate {
            clock.today()
        }
        let date = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let clock = FixedClock::new(date);
        assert_eq!(read(&clock), date);
    }
}
