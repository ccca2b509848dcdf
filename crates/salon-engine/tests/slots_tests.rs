//! Tests for open-slot enumeration and free windows.

use chrono::NaiveDate;
use salon_engine::slots::first_free_window;
use salon_engine::{find_available_slots, find_free_windows, Calendar, ClockTime, WorkingHours};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn t(s: &str) -> ClockTime {
    ClockTime::parse(s).unwrap()
}

fn labels(slots: &[ClockTime]) -> Vec<String> {
    slots.iter().map(|s| s.to_string()).collect()
}

// ── find_available_slots ────────────────────────────────────────────────────

#[test]
fn empty_day_offers_every_probe_that_fits() {
    let slots = find_available_slots(&Calendar::new(), date(), 60, &WorkingHours::default());

    // 09:00 through 20:00 every 15 minutes.
    assert_eq!(slots.len(), 45);
    assert_eq!(slots.first(), Some(&t("09:00")));
    assert_eq!(slots.last(), Some(&t("20:00")));
}

#[test]
fn slots_are_strictly_increasing() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("12:00"), 90, 10).unwrap();
    let slots = find_available_slots(&calendar, date(), 30, &WorkingHours::default());
    assert!(slots.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn booked_service_and_break_are_skipped() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("10:00"), 60, 10).unwrap();
    let hours = WorkingHours::new(t("09:00"), t("12:00"), 15).unwrap();

    let slots = find_available_slots(&calendar, date(), 30, &hours);

    // 09:45 + 30 ends at 10:15 (overlaps); 11:00 lands on the break; 11:15 is clear.
    assert_eq!(labels(&slots), vec!["09:00", "09:15", "09:30", "11:15", "11:30"]);
}

#[test]
fn fully_booked_day_has_no_slots() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("09:00"), 12 * 60, 10).unwrap();
    let slots = find_available_slots(&calendar, date(), 15, &WorkingHours::default());
    assert!(slots.is_empty());
}

#[test]
fn service_longer_than_working_day_has_no_slots() {
    let slots = find_available_slots(&Calendar::new(), date(), 13 * 60, &WorkingHours::default());
    assert!(slots.is_empty());
}

#[test]
fn probing_skips_five_minute_starts() {
    let mut calendar = Calendar::new();
    // Free gap 10:10-11:05 fits a 50-minute service only at 10:10 or 10:15.
    calendar.book_interval(date(), t("09:00"), 60, 10).unwrap();
    calendar.book_interval(date(), t("11:05"), 60, 10).unwrap();
    let hours = WorkingHours::new(t("09:00"), t("12:30"), 15).unwrap();

    let slots = find_available_slots(&calendar, date(), 50, &hours);

    assert_eq!(labels(&slots), vec!["10:15"]);
    assert!(calendar.is_available(date(), t("10:10"), 50));
}

#[test]
fn custom_working_hours_and_step() {
    let hours = WorkingHours::new(t("10:00"), t("11:00"), 20).unwrap();
    let slots = find_available_slots(&Calendar::new(), date(), 20, &hours);
    assert_eq!(labels(&slots), vec!["10:00", "10:20", "10:40"]);
}

#[test]
fn working_hours_reject_inverted_or_zero_step() {
    assert!(WorkingHours::new(t("12:00"), t("12:00"), 15).is_err());
    assert!(WorkingHours::new(t("09:00"), t("21:00"), 0).is_err());
}

// ── find_free_windows ───────────────────────────────────────────────────────

#[test]
fn empty_day_is_one_free_window() {
    let windows = find_free_windows(&Calendar::new(), date(), &WorkingHours::default());
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, t("09:00"));
    assert_eq!(windows[0].end, t("21:00"));
    assert_eq!(windows[0].duration_minutes, 720);
}

#[test]
fn service_and_break_merge_into_one_busy_block() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("10:00"), 60, 10).unwrap();

    let windows = find_free_windows(&calendar, date(), &WorkingHours::default());

    assert_eq!(windows.len(), 2);
    assert_eq!((windows[0].start, windows[0].end), (t("09:00"), t("10:00")));
    assert_eq!((windows[1].start, windows[1].end), (t("11:10"), t("21:00")));
    assert_eq!(windows[1].duration_minutes, 590);
}

#[test]
fn bookings_outside_working_hours_are_clipped() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("07:00"), 120, 10).unwrap();
    calendar.book_interval(date(), t("20:30"), 60, 10).unwrap();

    let windows = find_free_windows(&calendar, date(), &WorkingHours::default());

    assert_eq!(windows.len(), 1);
    assert_eq!((windows[0].start, windows[0].end), (t("09:10"), t("20:30")));
}

#[test]
fn first_free_window_respects_minimum_duration() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("09:30"), 60, 10).unwrap();

    let hours = WorkingHours::default();
    let first = first_free_window(&calendar, date(), &hours, 60).unwrap();
    assert_eq!(first.start, t("10:40"));

    let short = first_free_window(&calendar, date(), &hours, 15).unwrap();
    assert_eq!(short.start, t("09:00"));

    assert!(first_free_window(&calendar, date(), &hours, 24 * 60).is_none());
}
