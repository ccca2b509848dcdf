//! Minute-of-day time values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SalonError;
use crate::validator;

/// Minutes since midnight of a booking date, rendered as `HH:MM`.
///
/// Interval ends may lie past `24:00` (a late service whose break spills over
/// midnight); such values stay attached to the date they were booked on and render
/// with an hour of 24 or more. Values parsed from user input are always below `24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from hour and minute; `None` unless `hour < 24` and `minute < 60`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(ClockTime(hour * 60 + minute))
    }

    pub fn from_minutes(minutes: u32) -> Self {
        ClockTime(minutes)
    }

    /// Parse a strict `HH:MM` string.
    pub fn parse(s: &str) -> Result<Self, SalonError> {
        validator::validate_time_format(s)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// The time `minutes` later on the same date.
    pub fn plus(self, minutes: u32) -> Self {
        ClockTime(self.0.saturating_add(minutes))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SalonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClockTime::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
