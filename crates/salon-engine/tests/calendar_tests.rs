//! Tests for per-master calendar bookkeeping.

use chrono::NaiveDate;
use salon_engine::{Calendar, ClockTime, IntervalKind};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn t(s: &str) -> ClockTime {
    ClockTime::parse(s).unwrap()
}

/// A calendar holding one 60-minute service at 10:00 with a 10-minute break.
fn booked_haircut() -> Calendar {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("10:00"), 60, 10).unwrap();
    calendar
}

#[test]
fn empty_calendar_is_available_everywhere() {
    let calendar = Calendar::new();
    assert!(calendar.is_available(date(), t("00:00"), 24 * 60));
    assert!(calendar.is_available(date(), t("10:00"), 1));
}

#[test]
fn booking_records_service_then_break() {
    let busy = booked_haircut().list_busy_intervals(date());

    assert_eq!(busy.len(), 2);
    assert_eq!(busy[0].start, t("10:00"));
    assert_eq!(busy[0].end, t("11:00"));
    assert_eq!(busy[0].kind, IntervalKind::Service);
    assert_eq!(busy[1].start, t("11:00"));
    assert_eq!(busy[1].end, t("11:10"));
    assert_eq!(busy[1].kind, IntervalKind::Break);
}

#[test]
fn overlap_with_service_is_unavailable() {
    let calendar = booked_haircut();
    assert!(!calendar.is_available(date(), t("10:30"), 1));
    assert!(!calendar.is_available(date(), t("09:30"), 31));
    assert!(!calendar.is_available(date(), t("09:00"), 180));
}

#[test]
fn overlap_with_break_is_unavailable() {
    let calendar = booked_haircut();
    assert!(!calendar.is_available(date(), t("11:00"), 30));
    assert!(!calendar.is_available(date(), t("11:05"), 5));
}

#[test]
fn adjacent_requests_are_available() {
    let calendar = booked_haircut();
    // Ends exactly when the service starts.
    assert!(calendar.is_available(date(), t("09:00"), 60));
    // Starts exactly when the break ends.
    assert!(calendar.is_available(date(), t("11:10"), 30));
}

#[test]
fn other_dates_are_unaffected() {
    let calendar = booked_haircut();
    let next_day = date().succ_opt().unwrap();
    assert!(calendar.is_available(next_day, t("10:00"), 60));
    assert!(calendar.list_busy_intervals(next_day).is_empty());
}

#[test]
fn availability_depends_on_requested_duration() {
    let calendar = booked_haircut();
    assert!(calendar.is_available(date(), t("09:00"), 60));
    assert!(!calendar.is_available(date(), t("09:00"), 65));
}

#[test]
fn intervals_are_listed_in_start_order() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("15:00"), 30, 10).unwrap();
    calendar.book_interval(date(), t("09:00"), 45, 10).unwrap();
    calendar.book_interval(date(), t("12:00"), 60, 5).unwrap();

    let starts: Vec<String> = calendar
        .list_busy_intervals(date())
        .iter()
        .map(|b| b.start.to_string())
        .collect();
    assert_eq!(
        starts,
        vec!["09:00", "09:45", "12:00", "13:00", "15:00", "15:30"]
    );
}

#[test]
fn release_frees_service_and_break() {
    let mut calendar = booked_haircut();
    calendar.release_interval(date(), t("10:00"), 60);

    assert!(calendar.list_busy_intervals(date()).is_empty());
    assert!(calendar.is_available(date(), t("10:00"), 70));
    assert_eq!(calendar.booked_dates().count(), 0);
}

#[test]
fn release_is_idempotent() {
    let mut calendar = booked_haircut();
    calendar.release_interval(date(), t("10:00"), 60);
    calendar.release_interval(date(), t("10:00"), 60);
    calendar.release_interval(date(), t("14:00"), 30);
    assert!(calendar.list_busy_intervals(date()).is_empty());
}

#[test]
fn release_leaves_other_bookings_alone() {
    let mut calendar = booked_haircut();
    calendar.book_interval(date(), t("13:00"), 30, 10).unwrap();

    calendar.release_interval(date(), t("10:00"), 60);

    let busy = calendar.list_busy_intervals(date());
    assert_eq!(busy.len(), 2);
    assert_eq!(busy[0].start, t("13:00"));
    assert_eq!(busy[1].start, t("13:30"));
}

#[test]
fn zero_break_records_only_the_service() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("10:00"), 60, 0).unwrap();

    let busy = calendar.list_busy_intervals(date());
    assert_eq!(busy.len(), 1);
    assert!(calendar.is_available(date(), t("11:00"), 30));
}

#[test]
fn break_past_midnight_stays_on_booking_date() {
    let mut calendar = Calendar::new();
    calendar.book_interval(date(), t("23:30"), 30, 10).unwrap();

    let busy = calendar.list_busy_intervals(date());
    assert_eq!(busy[1].start.to_string(), "24:00");
    assert_eq!(busy[1].end.to_string(), "24:10");
    assert!(!calendar.is_available(date(), t("23:55"), 5));
}

#[test]
fn describe_renders_schedule_lines() {
    let lines: Vec<String> = booked_haircut()
        .list_busy_intervals(date())
        .iter()
        .map(|b| b.describe())
        .collect();
    assert_eq!(lines, vec!["10:00 (60 min)", "11:00 (break)"]);
}
