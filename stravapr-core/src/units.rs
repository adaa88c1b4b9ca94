//! Unit conversion for report output.
//!
//! The API reports distances in meters and durations in seconds. Reports show
//! miles with a fixed number of decimals and durations as whole seconds.

use chrono::TimeDelta;
use thiserror::Error;

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("invalid distance: {0} meters")]
    InvalidDistance(f64),
}

/// Convert meters to miles.
pub fn meters_to_miles(meters: f64) -> Result<f64, UnitError> {
    if !meters.is_finite() {
        return Err(UnitError::InvalidDistance(meters));
    }
    Ok(meters / METERS_PER_MILE)
}

/// Miles with exactly three decimals, e.g. `"0.000"`, `"12.431"`.
pub fn distance_miles(meters: f64) -> Result<String, UnitError> {
    Ok(fixed(meters_to_miles(meters)?, 3))
}

/// Miles with exactly two decimals. Used for the per-bike totals.
pub fn distance_miles_summary(meters: f64) -> Result<String, UnitError> {
    Ok(fixed(meters_to_miles(meters)?, 2))
}

/// Whole seconds of a duration. Sub-second parts are truncated.
pub fn seconds_as_number(duration: &TimeDelta) -> i64 {
    duration.num_seconds()
}

fn fixed(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    // -0.000 is still zero
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}
