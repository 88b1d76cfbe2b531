//! Integer-day arithmetic on [`CalendarDate`].
//!
//! Dates carry no time-of-day, so adding and subtracting days never drifts
//! across DST changes or local offsets.

use crate::domain::model::CalendarDate;
use crate::utils::error::{EstimatorError, Result};
use chrono::{Duration, NaiveDate};

/// Parses `YYYY-MM-DD`.
///
/// Each part must be all ASCII digits and the triple must name a real day;
/// anything else is [`EstimatorError::InvalidFormat`].
pub fn parse(text: &str) -> Result<CalendarDate> {
    let invalid = |reason: &str| EstimatorError::InvalidFormat {
        input: text.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = text.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(invalid("expected three '-' separated parts"));
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid("year, month and day must be numeric"));
    }

    let year: i32 = parts[0].parse().map_err(|_| invalid("year out of range"))?;
    let month: u32 = parts[1].parse().map_err(|_| invalid("month out of range"))?;
    let day: u32 = parts[2].parse().map_err(|_| invalid("day out of range"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(CalendarDate::from_naive)
        .ok_or_else(|| invalid("no such calendar day"))
}

/// Shifts `date` by `n` days (negative goes back), rolling months and years.
pub fn add_days(date: CalendarDate, n: i64) -> Result<CalendarDate> {
    let out_of_range = || EstimatorError::DateOutOfRange {
        date: date.to_string(),
        offset: n,
    };
    let delta = Duration::try_days(n).ok_or_else(out_of_range)?;
    date.naive()
        .checked_add_signed(delta)
        .map(CalendarDate::from_naive)
        .ok_or_else(out_of_range)
}

/// Signed difference `a - b` in days.
pub fn diff_days(a: CalendarDate, b: CalendarDate) -> f64 {
    (a.naive() - b.naive()).num_days() as f64
}
