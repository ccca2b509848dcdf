//! Open-slot search inside a master's working day.
//!
//! [`find_available_slots`] probes candidate start times on a fixed step and keeps the
//! ones the calendar accepts. [`find_free_windows`] merges busy intervals and reports
//! the gaps between them, clipped to working hours.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::clock::ClockTime;
use crate::error::{Result, SalonError};

pub const DEFAULT_PROBE_STEP_MINUTES: u32 = 15;

/// The bookable part of a day and the granularity of slot probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: ClockTime,
    pub end: ClockTime,
    /// Distance between probed start times. Coarser than the 5-minute booking grid,
    /// so some bookable starts are never offered.
    pub probe_step: u32,
}

impl WorkingHours {
    /// # Errors
    /// `SalonError::Config` if `start >= end` or `probe_step` is zero.
    pub fn new(start: ClockTime, end: ClockTime, probe_step: u32) -> Result<Self> {
        if start >= end {
            return Err(SalonError::Config(format!(
                "working day must start before it ends ({start} >= {end})"
            )));
        }
        if probe_step == 0 {
            return Err(SalonError::Config("probe step must be positive".to_string()));
        }
        Ok(Self {
            start,
            end,
            probe_step,
        })
    }
}

impl Default for WorkingHours {
    /// 09:00–21:00, probed every 15 minutes.
    fn default() -> Self {
        Self {
            start: ClockTime::from_minutes(9 * 60),
            end: ClockTime::from_minutes(21 * 60),
            probe_step: DEFAULT_PROBE_STEP_MINUTES,
        }
    }
}

/// A free gap between busy intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
    pub duration_minutes: u32,
}

/// Start times at which a `service_duration`-minute service fits on `date`.
///
/// Probing starts at `hours.start` and advances by `hours.probe_step` until a service
/// starting at the probe would end after `hours.end`. The result is strictly
/// increasing and empty when nothing fits.
pub fn find_available_slots(
    calendar: &Calendar,
    date: NaiveDate,
    service_duration: u32,
    hours: &WorkingHours,
) -> Vec<ClockTime> {
    let mut slots = Vec::new();
    // A zero step would never advance.
    let step = hours.probe_step.max(1);
    let mut probe = hours.start;

    while probe.plus(service_duration) <= hours.end {
        if calendar.is_available(date, probe, service_duration) {
            slots.push(probe);
        }
        probe = probe.plus(step);
    }

    slots
}

/// Merge overlapping or adjacent busy intervals, clipped to working hours.
///
/// Returns a sorted, non-overlapping list of (start, end) pairs.
fn merge_busy_periods(
    calendar: &Calendar,
    date: NaiveDate,
    hours: &WorkingHours,
) -> Vec<(ClockTime, ClockTime)> {
    // Busy intervals come back in start order already.
    let mut merged: Vec<(ClockTime, ClockTime)> = Vec::new();
    for busy in calendar.list_busy_intervals(date) {
        if busy.start >= hours.end || busy.end <= hours.start {
            continue;
        }
        let start = busy.start.max(hours.start);
        let end = busy.end.min(hours.end);

        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

/// Free gaps on `date` within working hours, sorted by start time.
pub fn find_free_windows(
    calendar: &Calendar,
    date: NaiveDate,
    hours: &WorkingHours,
) -> Vec<FreeWindow> {
    let mut windows = Vec::new();
    let mut cursor = hours.start;

    for (busy_start, busy_end) in merge_busy_periods(calendar, date, hours) {
        if cursor < busy_start {
            windows.push(window(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < hours.end {
        windows.push(window(cursor, hours.end));
    }

    windows
}

/// The first free gap of at least `min_duration` minutes.
pub fn first_free_window(
    calendar: &Calendar,
    date: NaiveDate,
    hours: &WorkingHours,
    min_duration: u32,
) -> Option<FreeWindow> {
    find_free_windows(calendar, date, hours)
        .into_iter()
        .find(|w| w.duration_minutes >= min_duration)
}

fn window(start: ClockTime, end: ClockTime) -> FreeWindow {
    FreeWindow {
        start,
        end,
        duration_minutes: end.minutes() - start.minutes(),
    }
}
