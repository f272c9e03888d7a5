//! Week-by-week life calendar.
//!
//! A life span (birth date to end date) is cut into seven-day cells. Each cell
//! is classified as lived, current, projected sleep, or remaining, and the
//! cells are packed into a grid that fits a given pixel width.
//!
//! ```
//! use chrono::NaiveDate;
//! use life_calendar::{CalendarOptions, LifeCalendar};
//!
//! let birth = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2090, 1, 1).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!
//! let calendar = LifeCalendar::build(birth, end, today, &CalendarOptions::default()).unwrap();
//! assert_eq!(calendar.timeline().lived_weeks(), 1252);
//! ```

mod calendar;
mod consts;
mod grid;
mod input;
mod prelude;
mod span;
#[cfg(test)]
mod test_utils;
mod timeline;

pub use calendar::{CalendarOptions, Cell, LifeCalendar};
pub use consts::*;
pub use grid::{GridLayout, GridPlanner, choose_grid};
pub use input::{normalize_sleep_hours, parse_expectancy_years, parse_expectancy_years_or, parse_sleep_hours};
pub use span::{CalendarSpan, SpanError};
pub use timeline::{SleepProjection, TimelineStats, WeekKind, compute_timeline};

use crate::prelude::*;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that can be reduced to a calendar day.
///
/// Week arithmetic only ever sees whole days, so time-of-day (and with it any
/// daylight-saving shift) is dropped before any delta is taken.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

/// Uses the date as seen in the value's own time zone.
impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Parses a strict `YYYY-MM-DD` date, returning `None` on any malformed input.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    try_parse_date(s).ok()
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `ParseError::EmptyInput` for blank input, `ParseError::InvalidFormat`
/// when the text is not three numeric components, and `ParseError::InvalidDate`
/// when the components do not name a real calendar day.
pub fn try_parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat(format!(
            "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} components",
            parts.len()
        )));
    };

    let year = parse_component::<i32>(year)?;
    let month = parse_component::<u32>(month)?;
    let day = parse_component::<u32>(day)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDate { year, month, day })
}

/// Digits only: rejects signs and whitespace that `str::parse` would accept or trip over.
fn parse_component<T: std::str::FromStr>(s: &str) -> Result<T, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<T>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

/// Formats a date for display, e.g. `Jan 1, 2000`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: impl CalendarDay, to: impl CalendarDay) -> i64 {
    to.calendar_day()
        .signed_duration_since(from.calendar_day())
        .num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ymd;
    use chrono::{FixedOffset, NaiveTime};

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("1991-08-15"), Some(ymd(1991, 8, 15)));
        assert_eq!(parse_date("  2000-01-01 "), Some(ymd(2000, 1, 1)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        struct TestCase {
            input:       &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase { input: "", description: "empty" },
            TestCase { input: "   ", description: "blank" },
            TestCase { input: "1991-08", description: "missing day" },
            TestCase { input: "1991-08-15-01", description: "too many components" },
            TestCase { input: "08/15/1991", description: "month-first" },
            TestCase { input: "1991-0A-15", description: "non-numeric month" },
            TestCase { input: "1991-08-+5", description: "signed day" },
            TestCase { input: "1991--15", description: "empty component" },
            TestCase { input: "2021-02-29", description: "not a leap year" },
            TestCase { input: "2024-13-01", description: "month out of range" },
            TestCase { input: "2024-04-31", description: "day out of range" },
        ];

        for case in &cases {
            assert_eq!(parse_date(case.input), None, "Expected None for: {}", case.description);
        }
    }

    #[test]
    fn test_try_parse_errors() {
        assert_eq!(try_parse_date(""), Err(ParseError::EmptyInput));
        assert!(matches!(try_parse_date("1991-XX-01"), Err(ParseError::InvalidFormat(_))));
        assert_eq!(
            try_parse_date("1900-02-29"),
            Err(ParseError::InvalidDate { year: 1900, month: 2, day: 29 })
        );
        assert_eq!(
            try_parse_date("1900-02-29").unwrap_err().to_string(),
            "Invalid calendar date: 1900-02-29"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2000, 1, 1)), "Jan 1, 2000");
        assert_eq!(format_date(ymd(1972, 11, 15)), "Nov 15, 1972");
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(ymd(2020, 1, 1), ymd(2020, 1, 3)), 2);
        assert_eq!(days_between(ymd(2020, 1, 3), ymd(2020, 1, 1)), -2);
        assert_eq!(days_between(ymd(2000, 1, 1), ymd(2024, 1, 1)), 8766);
    }

    #[test]
    fn test_calendar_day_strips_time() {
        let late = ymd(2024, 3, 9).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        let early = ymd(2024, 3, 10).and_time(NaiveTime::from_hms_opt(0, 0, 1).unwrap());
        assert_eq!(late.calendar_day(), ymd(2024, 3, 9));
        assert_eq!(days_between(late, early), 1);
    }

    #[test]
    fn test_calendar_day_uses_own_zone() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = offset
            .from_local_datetime(&ymd(2024, 11, 3).and_hms_opt(22, 0, 0).unwrap())
            .unwrap();
        assert_eq!(evening.calendar_day(), ymd(2024, 11, 3));
    }
}
