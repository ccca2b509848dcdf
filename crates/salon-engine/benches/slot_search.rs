use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use salon_engine::{find_available_slots, find_free_windows, Calendar, ClockTime, WorkingHours};
use std::hint::black_box;

/// A day with a 45-minute service every 90 minutes from 09:00.
fn busy_calendar(date: NaiveDate) -> Calendar {
    let mut calendar = Calendar::new();
    let mut start = ClockTime::from_minutes(9 * 60);
    while start.minutes() < 21 * 60 {
        calendar.book_interval(date, start, 45, 10).unwrap();
        start = start.plus(90);
    }
    calendar
}

fn bench_slot_search(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let calendar = busy_calendar(date);
    let hours = WorkingHours::default();

    c.bench_function("find_available_slots/busy_day", |b| {
        b.iter(|| find_available_slots(black_box(&calendar), date, black_box(30), &hours))
    });

    c.bench_function("find_free_windows/busy_day", |b| {
        b.iter(|| find_free_windows(black_box(&calendar), date, &hours))
    });
}

criterion_group!(benches, bench_slot_search);
criterion_main!(benches);
