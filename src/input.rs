//! Recovery for "soft" user input.
//!
//! Unusable expectancy or sleep figures are replaced by defaults instead of
//! failing; only an impossible span is a hard error.

use tracing::warn;

use crate::{DEFAULT_LIFE_EXPECTANCY_YEARS, DEFAULT_SLEEP_HOURS, HOURS_PER_DAY};

/// Clamps sleep hours to `[0, 24]`, substituting the default for NaN or infinity.
pub fn normalize_sleep_hours(hours: f64) -> f64 {
    if hours.is_finite() {
        hours.clamp(0.0, HOURS_PER_DAY)
    } else {
        warn!(hours, default = DEFAULT_SLEEP_HOURS, "non-finite sleep hours, using default");
        DEFAULT_SLEEP_HOURS
    }
}

/// Parses a sleep-hours figure such as `"7.5"`, falling back to the default.
pub fn parse_sleep_hours(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(hours) => normalize_sleep_hours(hours),
        Err(_) => {
            warn!(input, default = DEFAULT_SLEEP_HOURS, "unparseable sleep hours, using default");
            DEFAULT_SLEEP_HOURS
        },
    }
}

/// Parses a life expectancy in whole years, falling back to
/// `DEFAULT_LIFE_EXPECTANCY_YEARS` for anything that is not a positive integer.
pub fn parse_expectancy_years(input: &str) -> u32 {
    parse_expectancy_years_or(input, DEFAULT_LIFE_EXPECTANCY_YEARS)
}

/// Parses a life expectancy in whole years, falling back to `default`
/// for anything that is not a positive integer.
pub fn parse_expectancy_years_or(input: &str, default: u32) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(years) if years > 0 => years,
        _ => {
            warn!(input, default, "unusable life expectancy, using default");
            default
        },
    }
}
