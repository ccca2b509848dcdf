//! Per-master calendar of booked service and break intervals.
//!
//! Each date maps to the intervals booked on it, ordered by start time. Intervals are
//! half-open `[start, start + duration)`, so a booking that ends exactly when another
//! starts is NOT a conflict.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, SalonError};

/// What occupies an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Service,
    /// The mandatory idle time after a service.
    Break,
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalKind::Service => f.write_str("service"),
            IntervalKind::Break => f.write_str("break"),
        }
    }
}

/// A stored calendar record, keyed by its start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub duration: u32,
    pub kind: IntervalKind,
}

/// A snapshot of one occupied interval on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: ClockTime,
    pub end: ClockTime,
    pub kind: IntervalKind,
}

impl BusyInterval {
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes() - self.start.minutes()
    }

    /// Human-readable schedule line, e.g. `10:00 (60 min)` or `11:00 (break)`.
    pub fn describe(&self) -> String {
        match self.kind {
            IntervalKind::Service => format!("{} ({} min)", self.start, self.duration_minutes()),
            IntervalKind::Break => format!("{} (break)", self.start),
        }
    }
}

/// Returns true when `[a_start, a_end)` and `[b_start, b_end)` share any instant.
pub(crate) fn overlaps(
    a_start: ClockTime,
    a_end: ClockTime,
    b_start: ClockTime,
    b_end: ClockTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// One master's bookings, keyed by date then start time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    days: BTreeMap<NaiveDate, BTreeMap<ClockTime, BookedInterval>>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `[start, start + duration)` on `date` overlaps no service or break.
    ///
    /// Always pass the exact duration of the service being booked: masters perform
    /// services of different lengths.
    pub fn is_available(&self, date: NaiveDate, start: ClockTime, duration: u32) -> bool {
        let Some(day) = self.days.get(&date) else {
            return true;
        };

        let end = start.plus(duration);
        !day.iter().any(|(booked_start, booked)| {
            overlaps(start, end, *booked_start, booked_start.plus(booked.duration))
        })
    }

    /// Record a service at `start` followed by its break.
    ///
    /// Fails with [`SalonError::SlotOccupied`] and leaves the calendar untouched when
    /// the service or its break would overlap an existing record. A zero-minute break
    /// records no break interval.
    pub fn book_interval(
        &mut self,
        date: NaiveDate,
        start: ClockTime,
        duration: u32,
        break_duration: u32,
    ) -> Result<()> {
        if !self.is_available(date, start, duration + break_duration) {
            return Err(SalonError::SlotOccupied { slot: start, date });
        }

        let day = self.days.entry(date).or_default();
        day.insert(
            start,
            BookedInterval {
                duration,
                kind: IntervalKind::Service,
            },
        );
        if break_duration > 0 {
            day.insert(
                start.plus(duration),
                BookedInterval {
                    duration: break_duration,
                    kind: IntervalKind::Break,
                },
            );
        }
        Ok(())
    }

    /// Remove the service at `start` and the break at `start + service_duration`.
    ///
    /// Missing records are ignored, so releasing twice is harmless. Only records of
    /// the expected kind are removed.
    pub fn release_interval(&mut self, date: NaiveDate, start: ClockTime, service_duration: u32) {
        let Some(day) = self.days.get_mut(&date) else {
            return;
        };

        remove_kind(day, start, IntervalKind::Service);
        remove_kind(day, start.plus(service_duration), IntervalKind::Break);

        if day.is_empty() {
            self.days.remove(&date);
        }
    }

    /// Occupied intervals on `date` in start-time order; empty if nothing is booked.
    pub fn list_busy_intervals(&self, date: NaiveDate) -> Vec<BusyInterval> {
        self.days
            .get(&date)
            .map(|day| {
                day.iter()
                    .map(|(start, booked)| BusyInterval {
                        start: *start,
                        end: start.plus(booked.duration),
                        kind: booked.kind,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dates that currently hold at least one interval, ascending.
    pub fn booked_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }
}

fn remove_kind(day: &mut BTreeMap<ClockTime, BookedInterval>, at: ClockTime, kind: IntervalKind) {
    if day.get(&at).is_some_and(|booked| booked.kind == kind) {
        day.remove(&at);
    }
}
