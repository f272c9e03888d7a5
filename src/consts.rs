/// Calendar days covered by one week-cell
pub const DAYS_PER_WEEK: i64 = 7;

/// Hours in a calendar day, upper bound for sleep hours
pub const HOURS_PER_DAY: f64 = 24.0;

/// Sleep hours per day used when the supplied figure is unusable
pub const DEFAULT_SLEEP_HOURS: f64 = 8.0;

/// Life expectancy (years) used when the supplied figure is unusable
pub const DEFAULT_LIFE_EXPECTANCY_YEARS: u32 = 80;

/// Smallest cell edge (pixels) the planner will shrink to
pub const MIN_CELL_SIZE: u32 = 4;
/// Largest cell edge (pixels), also used when the width is unknown
pub const MAX_CELL_SIZE: u32 = 16;
/// Gap between neighbouring cells (pixels)
pub const DEFAULT_GAP: u32 = 4;
/// Outer margin around the grid when computing canvas geometry (pixels)
pub const DEFAULT_MARGIN: u32 = 10;

/// Extra columns added per this many "ideal" columns, biasing the grid wider than tall
pub(crate) const WIDTH_BIAS_DIVISOR: usize = 6;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Span separator (ISO 8601 interval format)
pub const SPAN_SEPARATOR: char = '/';
