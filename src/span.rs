use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{CalendarDay, DAYS_PER_WEEK, ParseError, SPAN_SEPARATOR, days_between, prelude::*, try_parse_date};

/// The visualized life span: birth date up to (excluding) the end date.
/// The end date is always strictly after the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct CalendarSpan {
    start: NaiveDate,
    end:   NaiveDate,
}

/// Error type for span construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    /// End date is not after the start date.
    #[error("Invalid span: end ({end}) is not after start ({start})")]
    InvalidSpan { start: NaiveDate, end: NaiveDate },

    /// Adding the life expectancy to the birth date left the calendar.
    #[error("Invalid life expectancy: {years} years from {start}")]
    InvalidExpectancy { start: NaiveDate, years: u32 },

    /// Error parsing a date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid span format.
    #[error("Invalid span format: {0}")]
    InvalidFormat(String),
}

impl CalendarSpan {
    /// Creates a new span, dropping any time-of-day first.
    ///
    /// # Errors
    /// Returns `SpanError::InvalidSpan` if `end <= start`.
    pub fn new(start: impl CalendarDay, end: impl CalendarDay) -> Result<Self, SpanError> {
        let start = start.calendar_day();
        let end = end.calendar_day();
        if end <= start {
            return Err(SpanError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a span ending `years` calendar years after `birth`.
    /// A Feb 29 birth date lands on Feb 28 when the end year is not a leap year.
    ///
    /// # Errors
    /// Returns `SpanError::InvalidExpectancy` if the end date is not representable,
    /// and `SpanError::InvalidSpan` if `years` is zero.
    pub fn from_expectancy(birth: impl CalendarDay, years: u32) -> Result<Self, SpanError> {
        let start = birth.calendar_day();
        let end = years
            .checked_mul(12)
            .and_then(|months| start.checked_add_months(Months::new(months)))
            .ok_or(SpanError::InvalidExpectancy { start, years })?;
        Self::new(start, end)
    }

    /// Returns the first day of the span
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the end date (exclusive)
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the span, always positive
    pub fn days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    /// Number of week-cells: a partial final week still gets a cell.
    pub fn total_weeks(&self) -> usize {
        let days = self.days().unsigned_abs();
        let weeks = days.div_ceil(DAYS_PER_WEEK.unsigned_abs()).max(1);
        usize::try_from(weeks).unwrap_or(usize::MAX)
    }

    /// Whole weeks elapsed between the start and `now`; zero when `now` is not after the start.
    /// The week in progress never counts.
    pub fn completed_weeks(&self, now: impl CalendarDay) -> usize {
        let now = now.calendar_day();
        if now <= self.start {
            return 0;
        }
        let weeks = days_between(self.start, now) / DAYS_PER_WEEK;
        usize::try_from(weeks).unwrap_or(usize::MAX)
    }

    /// Checks if `date` falls inside `[start, end)`
    pub fn contains(&self, date: impl CalendarDay) -> bool {
        let date = date.calendar_day();
        self.start <= date && date < self.end
    }
}

impl FromStr for CalendarSpan {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let Some((start_str, end_str)) = trimmed.split_once(SPAN_SEPARATOR) else {
            return Err(SpanError::InvalidFormat(format!(
                "No span separator found (expected '{SPAN_SEPARATOR}'): {s}"
            )));
        };
        if end_str.contains(SPAN_SEPARATOR) {
            let separator_count = trimmed.matches(SPAN_SEPARATOR).count();
            return Err(SpanError::InvalidFormat(format!(
                "Too many '{SPAN_SEPARATOR}' separators: expected 1, found {separator_count}"
            )));
        }

        let start = try_parse_date(start_str)?;
        let end = try_parse_date(end_str)?;

        Self::new(start, end)
    }
}

impl Serialize for CalendarSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
