//! Date helpers for document text and calendar arithmetic.

use chrono::{Datelike, NaiveDate};

/// Parses a date as printed on Korean payroll documents.
///
/// Accepts `YYYY-MM-DD`, `YYYY.MM.DD`, `YYYY/MM/DD`, `YYYYMMDD` and
/// `YYYY년 M월 D일`. Surrounding whitespace and a trailing dot are ignored.
///
/// # Examples
///
/// ```
/// use subsidy_engine::models::parse_document_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 3, 2);
/// assert_eq!(parse_document_date("2025-03-02"), expected);
/// assert_eq!(parse_document_date("2025. 3. 2."), expected);
/// assert_eq!(parse_document_date("2025년 3월 2일"), expected);
/// assert_eq!(parse_document_date("20250302"), expected);
/// assert_eq!(parse_document_date("next spring"), None);
/// ```
pub fn parse_document_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits_only: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    if digits_only.len() == 8 && digits_only.chars().all(|c| c.is_ascii_digit()) {
        let year = digits_only[0..4].parse().ok()?;
        let month = digits_only[4..6].parse().ok()?;
        let day = digits_only[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let parts: Vec<&str> = trimmed
        .split(|c: char| matches!(c, '-' | '.' | '/' | '년' | '월' | '일') || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() != 3 || parts[0].len() != 4 {
        return None;
    }
    if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let year = parts[0].parse().ok()?;
    let month = parts[1].parse().ok()?;
    let day = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Completed calendar months from `start` to `end`; 0 when `start` is later.
///
/// ```
/// use subsidy_engine::models::completed_months;
/// use chrono::NaiveDate;
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(completed_months(d(2025, 1, 15), d(2026, 1, 15)), 12);
/// assert_eq!(completed_months(d(2025, 1, 15), d(2026, 1, 14)), 11);
/// assert_eq!(completed_months(d(2026, 5, 1), d(2026, 1, 1)), 0);
/// ```
pub fn completed_months(start: NaiveDate, end: NaiveDate) -> u32 {
    if start >= end {
        return 0;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Completed years from `birth` to `today`; `None` when `birth` is in the future.
pub fn completed_years(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
