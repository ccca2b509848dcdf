//! Validation of requested booking times and dates.
//!
//! All checks are pure. Each returns the parsed value on success so callers never
//! parse the same string twice.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::clock::ClockTime;
use crate::error::{Result, SalonError};

/// Bookable start times must fall on this minute grid.
pub const MINUTE_GRANULARITY: u32 = 5;

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern is a valid regex")
});

/// Accept only 24-hour `HH:MM` with hour `00`–`23` and minute `00`–`59`.
///
/// # Errors
/// Returns `SalonError::InvalidTimeFormat` for anything else.
pub fn validate_time_format(s: &str) -> Result<ClockTime> {
    let caps = TIME_PATTERN
        .captures(s)
        .ok_or_else(|| SalonError::InvalidTimeFormat(s.to_string()))?;
    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| SalonError::InvalidTimeFormat(s.to_string()))?;
    let minute: u32 = caps[2]
        .parse()
        .map_err(|_| SalonError::InvalidTimeFormat(s.to_string()))?;
    ClockTime::from_hm(hour, minute).ok_or_else(|| SalonError::InvalidTimeFormat(s.to_string()))
}

/// Require the minute component of a well-formed `HH:MM` string to be a multiple of 5.
///
/// # Errors
/// Returns `SalonError::InvalidTimeFormat` if `s` is not `HH:MM`, and
/// `SalonError::UnroundMinutes` carrying `s` if the minutes are off the grid.
pub fn validate_round_minutes(s: &str) -> Result<ClockTime> {
    let time = validate_time_format(s)?;
    if time.minute() % MINUTE_GRANULARITY != 0 {
        return Err(SalonError::UnroundMinutes(s.to_string()));
    }
    Ok(time)
}

/// Parse a `YYYY-MM-DD` date without any past/future judgement.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| SalonError::MalformedDate(date_str.to_string()))
}

/// Parse `date_str` and reject dates strictly before `today`. Same-day is allowed.
///
/// # Errors
/// `SalonError::MalformedDate` when the string does not parse, `SalonError::PastDate`
/// when it parses to a day before `today`.
pub fn validate_future_date(date_str: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = parse_date(date_str)?;
    if date < today {
        return Err(SalonError::PastDate(date));
    }
    Ok(date)
}
