//! Korean resident registration number handling.
//!
//! IDs look like `YYMMDD-GNNNNNN`. Documents routinely mask everything after
//! the birth date, so every position is optional.

use chrono::{Datelike, NaiveDate};

use crate::models::completed_years;

const MASK_CHARS: [char; 7] = ['*', 'X', 'x', '●', '•', '○', '#'];

/// A parsed, possibly masked resident registration number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentId {
    positions: Vec<Option<u8>>,
}

impl ResidentId {
    /// Parses an ID, returning `None` when it contains foreign characters
    /// or is longer than thirteen positions.
    ///
    /// ```
    /// use subsidy_engine::reconciliation::ResidentId;
    ///
    /// assert!(ResidentId::parse("900101-1234567").is_some());
    /// assert!(ResidentId::parse("900101-1******").is_some());
    /// assert!(ResidentId::parse("not an id").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let mut positions = Vec::with_capacity(13);
        for c in raw.chars() {
            if c == '-' || c.is_whitespace() {
                continue;
            }
            if let Some(d) = c.to_digit(10) {
                positions.push(Some(d as u8));
            } else if MASK_CHARS.contains(&c) {
                positions.push(None);
            } else {
                return None;
            }
        }
        if positions.is_empty() || positions.len() > 13 {
            return None;
        }
        Some(Self { positions })
    }

    fn digit(&self, index: usize) -> Option<u32> {
        self.positions.get(index).copied().flatten().map(u32::from)
    }

    fn two_digits(&self, index: usize) -> Option<u32> {
        Some(self.digit(index)? * 10 + self.digit(index + 1)?)
    }

    /// Returns the six birth digits when all are present.
    fn birth_digits(&self) -> Option<[u8; 6]> {
        let mut digits = [0u8; 6];
        for (i, slot) in digits.iter_mut().enumerate() {
            *slot = self.positions.get(i).copied().flatten()?;
        }
        Some(digits)
    }

    /// Resolves the birth date, using the century digit when visible and the
    /// evaluation date to pick a century otherwise.
    pub fn birth_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let yy = self.two_digits(0)? as i32;
        let month = self.two_digits(2)?;
        let day = self.two_digits(4)?;

        let century = match self.digit(6) {
            Some(1 | 2 | 5 | 6) => 1900,
            Some(3 | 4 | 7 | 8) => 2000,
            Some(9 | 0) => 1800,
            _ => {
                if yy <= today.year() % 100 {
                    2000
                } else {
                    1900
                }
            }
        };

        NaiveDate::from_ymd_opt(century + yy, month, day)
    }

    /// Completed years of age on `today`.
    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        completed_years(self.birth_date(today)?, today)
    }

    /// True when both IDs expose the same birth digits and agree on every
    /// later position where neither is masked.
    ///
    /// ```
    /// use subsidy_engine::reconciliation::ResidentId;
    ///
    /// let full = ResidentId::parse("900101-1234567").unwrap();
    /// let masked = ResidentId::parse("900101-1******").unwrap();
    /// let other = ResidentId::parse("900101-2******").unwrap();
    /// assert!(full.partially_matches(&masked));
    /// assert!(!full.partially_matches(&other));
    /// ```
    pub fn partially_matches(&self, other: &ResidentId) -> bool {
        match (self.birth_digits(), other.birth_digits()) {
            (Some(a), Some(b)) if a == b => {}
            _ => return false,
        }
        self.positions
            .iter()
            .zip(other.positions.iter())
            .skip(6)
            .all(|pair| match pair {
                (Some(a), Some(b)) => a == b,
                _ => true,
            })
    }
}

/// Age from raw resident ID text, if it can be parsed.
pub fn age_from_resident_id(raw: &str, today: NaiveDate) -> Option<u32> {
    ResidentId::parse(raw)?.age(today)
}

/// Partial match on raw resident ID text; false when either side is unreadable.
pub fn resident_ids_match(a: &str, b: &str) -> bool {
    match (ResidentId::parse(a), ResidentId::parse(b)) {
        (Some(a), Some(b)) => a.partially_matches(&b),
        _ => false,
    }
}
