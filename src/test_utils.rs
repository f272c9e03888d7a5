//! Shared helpers for unit tests.

use chrono::NaiveDate;

use crate::CalendarSpan;

/// Builds a date from known-good components.
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("test date must be a real calendar day")
}

/// Builds a span from known-good, ordered dates.
pub fn span(start: (i32, u32, u32), end: (i32, u32, u32)) -> CalendarSpan {
    CalendarSpan::new(ymd(start.0, start.1, start.2), ymd(end.0, end.1, end.2))
        .expect("test span must be ordered")
}
