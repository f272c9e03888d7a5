use std::ops::Range;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CalendarDay, CalendarSpan, DAYS_PER_WEEK, HOURS_PER_DAY, SpanError, days_between, normalize_sleep_hours, prelude::*};

/// Display class of a single week-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekKind {
    /// Fully in the past
    #[display(fmt = "lived")]
    Lived,
    /// Contains "today"
    #[display(fmt = "current")]
    Current,
    /// Future week projected to be spent asleep
    #[display(fmt = "sleep")]
    Sleep,
    /// Any other future week
    #[display(fmt = "remaining")]
    Remaining,
}

impl WeekKind {
    /// Stable lowercase name, suitable as a style class
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lived => "lived",
            Self::Current => "current",
            Self::Sleep => "sleep",
            Self::Remaining => "remaining",
        }
    }
}

/// Estimate of the remaining weeks that will be spent asleep.
///
/// The marked cells form the half-open range `start_index..end_index`, which
/// begins right after the current week and never extends past the last cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepProjection {
    hours_per_day: f64,
    days:          u64,
    weeks:         usize,
    start_index:   usize,
    end_index:     usize,
}

impl SleepProjection {
    /// Remaining days are counted from `today` itself, not from the current
    /// week boundary, so day and week totals can disagree by a few days.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn project(span: &CalendarSpan, today: NaiveDate, hours: f64, current_index: usize, remaining_weeks: usize) -> Self {
        let hours_per_day = normalize_sleep_hours(hours);
        let remaining_days = days_between(today, span.end()).max(0).unsigned_abs();

        let days = (remaining_days as f64 * hours_per_day / HOURS_PER_DAY).round() as u64;
        let rounded_weeks = (days as f64 / DAYS_PER_WEEK as f64).round() as usize;
        let weeks = rounded_weeks.min(remaining_weeks);

        let total_weeks = span.total_weeks();
        let start_index = (current_index + 1).min(total_weeks);
        let end_index = (start_index + weeks).min(total_weeks);

        Self { hours_per_day, days, weeks, start_index, end_index }
    }

    /// Sleep hours per day after clamping
    pub const fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    /// Remaining days projected asleep
    pub const fn days(&self) -> u64 {
        self.days
    }

    /// Remaining weeks projected asleep, never more than the remaining weeks
    pub const fn weeks(&self) -> usize {
        self.weeks
    }

    /// First marked cell
    pub const fn start_index(&self) -> usize {
        self.start_index
    }

    /// One past the last marked cell
    pub const fn end_index(&self) -> usize {
        self.end_index
    }

    /// Marked cells as a range
    pub const fn indices(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    /// Checks if the cell at `index` is marked
    pub const fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index < self.end_index
    }
}

/// Week-level statistics for one span as seen from one day.
///
/// Built only by [`compute_timeline`] or [`TimelineStats::new`]; the
/// serialized form is output only:
///
/// ```compile_fail
/// let stats: life_calendar::TimelineStats = serde_json::from_str(
///     r#"{"span":"2000-01-01/2001-01-01","today":"2000-06-01","totalWeeks":0,
///         "livedWeeks":9,"currentIndex":7,"remainingWeeks":0,"sleep":null}"#,
/// ).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStats {
    span:            CalendarSpan,
    today:           NaiveDate,
    total_weeks:     usize,
    lived_weeks:     usize,
    current_index:   usize,
    remaining_weeks: usize,
    sleep:           Option<SleepProjection>,
}

/// Computes week statistics for the span `birth..end` as seen from `today`.
///
/// All three dates are reduced to calendar days first. A sleep projection is
/// attached only when `sleep_hours_per_day` is supplied.
///
/// # Errors
/// Returns `SpanError::InvalidSpan` if `end` is not after `birth`.
pub fn compute_timeline(
    birth: impl CalendarDay,
    end: impl CalendarDay,
    sleep_hours_per_day: Option<f64>,
    today: impl CalendarDay,
) -> Result<TimelineStats, SpanError> {
    let span = CalendarSpan::new(birth, end)?;
    Ok(TimelineStats::new(span, sleep_hours_per_day, today))
}

impl TimelineStats {
    /// Computes statistics for an already validated span.
    ///
    /// "Today" before the span or past its end is clamped so the current cell
    /// is always a valid index.
    pub fn new(span: CalendarSpan, sleep_hours_per_day: Option<f64>, today: impl CalendarDay) -> Self {
        let today = today.calendar_day();
        let total_weeks = span.total_weeks();
        let last_index = total_weeks - 1;

        let lived_weeks = span.completed_weeks(today).min(last_index);
        let current_index = lived_weeks.min(last_index);
        let remaining_weeks = total_weeks.saturating_sub(lived_weeks + 1);

        let sleep = sleep_hours_per_day
            .map(|hours| SleepProjection::project(&span, today, hours, current_index, remaining_weeks));

        debug!(
            %span,
            %today,
            total_weeks,
            lived_weeks,
            current_index,
            remaining_weeks,
            sleep_weeks = sleep.map(|s| s.weeks()),
            "computed timeline"
        );

        Self {
            span,
            today,
            total_weeks,
            lived_weeks,
            current_index,
            remaining_weeks,
            sleep,
        }
    }

    /// The span the statistics describe
    pub const fn span(&self) -> CalendarSpan {
        self.span
    }

    /// The reference day, without time-of-day
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    pub const fn total_weeks(&self) -> usize {
        self.total_weeks
    }

    pub const fn lived_weeks(&self) -> usize {
        self.lived_weeks
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub const fn remaining_weeks(&self) -> usize {
        self.remaining_weeks
    }

    /// Sleep projection, present only when sleep hours were supplied
    pub const fn sleep(&self) -> Option<SleepProjection> {
        self.sleep
    }

    /// Share of cells already lived, in percent
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_lived(&self) -> f64 {
        self.lived_weeks as f64 * 100.0 / self.total_weeks as f64
    }

    /// Classification of the cell at `index`, `None` past the last cell.
    ///
    /// Precedence: current, then lived, then sleep, then remaining.
    pub fn week_kind(&self, index: usize) -> Option<WeekKind> {
        (index < self.total_weeks).then(|| self.kind_at(index))
    }

    /// Every cell in order with its classification
    pub fn weeks(&self) -> impl Iterator<Item = (usize, WeekKind)> + '_ {
        (0..self.total_weeks).map(move |index| (index, self.kind_at(index)))
    }

    fn kind_at(&self, index: usize) -> WeekKind {
        if index == self.current_index {
            WeekKind::Current
        } else if index < self.lived_weeks {
            WeekKind::Lived
        } else if self.sleep.is_some_and(|s| s.contains(index)) {
            WeekKind::Sleep
        } else {
            WeekKind::Remaining
        }
    }
}
