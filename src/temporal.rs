// ⏰ Month calendar helpers
// Date parsing and calendar year-month bucketing for the date-based views.
//
// Labels are pinned to English abbreviations so output never depends on the
// host locale.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ============================================================================
// MONTH KEY
// ============================================================================

/// MonthKey - a calendar year-month bucket (`YYYY-MM`)
///
/// Orders chronologically: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        MonthKey { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey::new(date.year(), date.month())
    }

    /// Bucket for a raw date string, `None` when it does not parse
    pub fn parse(date: &str) -> Option<Self> {
        parse_expense_date(date).map(MonthKey::from_date)
    }

    /// Short month label, e.g. `Jan`
    pub fn label(&self) -> &'static str {
        month_label(self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Three-letter English abbreviation for a 1-based month number
pub fn month_label(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_ABBREVIATIONS[(month - 1) as usize],
        _ => "",
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse an ISO-8601 style date string to its calendar date
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, naive date-times and RFC 3339
/// timestamps. Timestamps keep the calendar date written in their own offset.
pub fn parse_expense_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.naive_local().date());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, format) {
            return Some(dt.date());
        }
    }

    parse_partial_date(date)
}

/// `YYYY-MM` and `YYYY` resolve to the first day of the period
fn parse_partial_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('-');
    let year = parts.next()?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;

    let month = match parts.next() {
        None => 1,
        Some(m) if m.len() == 2 && m.chars().all(|c| c.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
    };

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)
}

// ============================================================================
// TESTS
// ============================================================================
