use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    CalendarDay, CalendarSpan, DEFAULT_GAP, DEFAULT_LIFE_EXPECTANCY_YEARS, DEFAULT_MARGIN, GridLayout, GridPlanner,
    MAX_CELL_SIZE, MIN_CELL_SIZE, SpanError, TimelineStats, WeekKind, parse_expectancy_years_or,
};

/// Recognized options for building a calendar.
///
/// Every field has a default, so a partial JSON object such as
/// `{"sleepHoursPerDay": 7.5}` is a complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarOptions {
    /// Attach a sleep projection using this many hours per day
    pub sleep_hours_per_day:   Option<f64>,
    /// Fit cells to this width (pixels); `None` or `0` uses the maximum cell size
    pub container_width_px:    Option<u32>,
    pub gap_px:                u32,
    pub min_cell_size:         u32,
    pub max_cell_size:         u32,
    /// Outer margin used for cell pixel origins
    pub margin_px:             u32,
    /// Years used when a typed life expectancy is unusable
    pub life_expectancy_years: u32,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            sleep_hours_per_day:   None,
            container_width_px:    None,
            gap_px:                DEFAULT_GAP,
            min_cell_size:         MIN_CELL_SIZE,
            max_cell_size:         MAX_CELL_SIZE,
            margin_px:             DEFAULT_MARGIN,
            life_expectancy_years: DEFAULT_LIFE_EXPECTANCY_YEARS,
        }
    }
}

impl CalendarOptions {
    /// Grid sizing rules described by these options
    pub const fn planner(&self) -> GridPlanner {
        GridPlanner {
            gap:           self.gap_px,
            min_cell_size: self.min_cell_size,
            max_cell_size: self.max_cell_size,
        }
    }

    /// Parses a typed life expectancy, falling back to `life_expectancy_years`
    pub fn expectancy_years(&self, input: &str) -> u32 {
        parse_expectancy_years_or(input, self.life_expectancy_years)
    }
}

/// One week-cell, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub index:  usize,
    pub kind:   WeekKind,
    pub column: usize,
    pub row:    usize,
    /// Left edge (pixels), including the margin
    pub x:      usize,
    /// Top edge (pixels), including the margin
    pub y:      usize,
}

/// Timeline statistics and the grid they are drawn on.
///
/// The grid is always sized for the timeline's week count; swapping in a
/// foreign layout is not possible:
///
/// ```compile_fail
/// # use life_calendar::{CalendarOptions, LifeCalendar, choose_grid};
/// # let day = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// # let end = chrono::NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
/// let mut calendar = LifeCalendar::build(day, end, day, &CalendarOptions::default()).unwrap();
/// calendar.grid = choose_grid(10, None, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeCalendar {
    timeline: TimelineStats,
    grid:     GridLayout,
    #[serde(skip)]
    planner:  GridPlanner,
    #[serde(skip)]
    margin:   u32,
}

impl LifeCalendar {
    /// Computes the timeline for `birth..end` as seen from `today` and lays it out.
    ///
    /// # Errors
    /// Returns `SpanError::InvalidSpan` if `end` is not after `birth`.
    pub fn build(
        birth: impl CalendarDay,
        end: impl CalendarDay,
        today: impl CalendarDay,
        options: &CalendarOptions,
    ) -> Result<Self, SpanError> {
        let span = CalendarSpan::new(birth, end)?;
        Ok(Self::for_span(span, today, options))
    }

    /// Like [`LifeCalendar::build`], with the end date `years` after `birth`.
    ///
    /// # Errors
    /// Returns `SpanError` if `years` is zero or the end date is not representable.
    pub fn from_expectancy(
        birth: impl CalendarDay,
        years: u32,
        today: impl CalendarDay,
        options: &CalendarOptions,
    ) -> Result<Self, SpanError> {
        let span = CalendarSpan::from_expectancy(birth, years)?;
        Ok(Self::for_span(span, today, options))
    }

    /// Like [`LifeCalendar::from_expectancy`], with the years typed by a user.
    /// Unusable input falls back to `options.life_expectancy_years`.
    ///
    /// # Errors
    /// Returns `SpanError` if the end date is not representable.
    pub fn from_expectancy_input(
        birth: impl CalendarDay,
        years: &str,
        today: impl CalendarDay,
        options: &CalendarOptions,
    ) -> Result<Self, SpanError> {
        Self::from_expectancy(birth, options.expectancy_years(years), today, options)
    }

    /// Lays out an already validated span.
    pub fn for_span(span: CalendarSpan, today: impl CalendarDay, options: &CalendarOptions) -> Self {
        let timeline = TimelineStats::new(span, options.sleep_hours_per_day, today);
        let planner = options.planner();
        let grid = planner.choose(timeline.total_weeks(), options.container_width_px);
        Self { timeline, grid, planner, margin: options.margin_px }
    }

    /// Week statistics
    pub const fn timeline(&self) -> &TimelineStats {
        &self.timeline
    }

    /// Grid the weeks are laid out on
    pub const fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// Recomputes only the grid for a new container width; the timeline is kept.
    pub fn relayout(&self, container_width: Option<u32>) -> Self {
        debug!(?container_width, "relayout");
        Self {
            grid: self.planner.choose(self.timeline.total_weeks(), container_width),
            ..*self
        }
    }

    /// Every cell in order with its classification and pixel origin
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.timeline.weeks().map(move |(index, kind)| {
            let (column, row) = self.grid.cell_position(index);
            let (x, y) = self.grid.cell_origin(index, self.margin);
            Cell { index, kind, column, row, x, y }
        })
    }

    /// Pixel `(width, height)` of the canvas including margins
    pub const fn canvas_size(&self) -> (usize, usize) {
        self.grid.canvas_size(self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ymd;

    #[test]
    fn test_build_with_defaults() {
        let calendar = LifeCalendar::build(ymd(2000, 1, 1), ymd(2090, 1, 1), ymd(2024, 1, 1), &CalendarOptions::default())
            .unwrap();
        assert_eq!(calendar.timeline().total_weeks(), 4697);
        assert_eq!(calendar.timeline().lived_weeks(), 1252);
        assert!(calendar.timeline().sleep().is_none());
        assert_eq!(calendar.grid().cell_size(), MAX_CELL_SIZE);
        assert!(calendar.grid().capacity() >= 4697);
    }

    #[test]
    fn test_build_rejects_inverted_span() {
        let result = LifeCalendar::build(ymd(2020, 1, 10), ymd(2020, 1, 1), ymd(2020, 1, 5), &CalendarOptions::default());
        assert!(matches!(result, Err(SpanError::InvalidSpan { .. })));
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: CalendarOptions =
            serde_json::from_str(r#"{"sleepHoursPerDay": 7.5, "containerWidthPx": 300}"#).unwrap();
        assert_eq!(options.sleep_hours_per_day, Some(7.5));
        assert_eq!(options.container_width_px, Some(300));
        assert_eq!(options.gap_px, DEFAULT_GAP);
        assert_eq!(options.planner(), GridPlanner::default());

        let calendar = LifeCalendar::build(ymd(1980, 1, 1), ymd(2060, 1, 1), ymd(2024, 1, 1), &options).unwrap();
        assert!(calendar.timeline().sleep().is_some());
        assert!(calendar.grid().content_width() <= 300);
    }

    #[test]
    fn test_from_expectancy() {
        let calendar =
            LifeCalendar::from_expectancy(ymd(1972, 11, 15), 100, ymd(2024, 1, 1), &CalendarOptions::default()).unwrap();
        assert_eq!(calendar.timeline().span().end(), ymd(2072, 11, 15));
    }

    #[test]
    fn test_expectancy_default_is_configurable() {
        let options: CalendarOptions = serde_json::from_str(r#"{"lifeExpectancyYears": 95}"#).unwrap();
        assert_eq!(options.expectancy_years("not a number"), 95);
        assert_eq!(options.expectancy_years("70"), 70);
        assert_eq!(CalendarOptions::default().expectancy_years(""), DEFAULT_LIFE_EXPECTANCY_YEARS);

        let calendar = LifeCalendar::from_expectancy_input(ymd(1990, 6, 15), "", ymd(2024, 1, 1), &options).unwrap();
        assert_eq!(calendar.timeline().span().end(), ymd(2085, 6, 15));
    }

    #[test]
    fn test_relayout_keeps_timeline() {
        let calendar = LifeCalendar::build(ymd(2000, 1, 1), ymd(2090, 1, 1), ymd(2024, 1, 1), &CalendarOptions::default())
            .unwrap();
        let narrow = calendar.relayout(Some(300));
        assert_eq!(narrow.timeline(), calendar.timeline());
        assert!(narrow.grid().columns() < calendar.grid().columns());
        assert_eq!(narrow.relayout(None).grid(), calendar.grid());
    }

    #[test]
    fn test_cells() {
        let options = CalendarOptions {
            sleep_hours_per_day: Some(8.0),
            margin_px: 0,
            ..CalendarOptions::default()
        };
        let calendar = LifeCalendar::build(ymd(2000, 1, 1), ymd(2001, 1, 1), ymd(2000, 1, 22), &options).unwrap();
        let cells: Vec<Cell> = calendar.cells().collect();
        assert_eq!(cells.len(), calendar.timeline().total_weeks());

        let current = cells[calendar.timeline().current_index()];
        assert_eq!(current.kind, WeekKind::Current);
        let (column, row) = calendar.grid().cell_position(current.index);
        assert_eq!((current.column, current.row), (column, row));

        let pitch = (calendar.grid().cell_size() + calendar.grid().gap()) as usize;
        assert_eq!((cells[1].x, cells[1].y), (pitch, 0));
        assert!(cells.iter().all(|c| c.x < calendar.canvas_size().0 && c.y < calendar.canvas_size().1));
    }

    #[test]
    fn test_serialized_summary() {
        let calendar = LifeCalendar::build(ymd(2000, 1, 1), ymd(2000, 1, 29), ymd(2000, 1, 15), &CalendarOptions::default())
            .unwrap();
        let json = serde_json::to_value(calendar).unwrap();
        assert_eq!(json["timeline"]["totalWeeks"], 4);
        assert_eq!(json["grid"]["columns"], 2);
        assert!(json.get("planner").is_none());
    }
}
