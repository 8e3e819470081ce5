use std::hint::black_box;

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_finder::{
    find_group_free_slots, merge_overlapping, DaysOfWeek, PersonCalendar, SearchConstraints,
    TimeInterval,
};

/// Twenty people, each with four one-hour meetings on every day of January 2025,
/// staggered so calendars overlap partially.
fn january_calendars() -> Vec<PersonCalendar> {
    let origin = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    (0..20)
        .map(|p| {
            let busy = (0..31)
                .flat_map(|day| {
                    (0..4).map(move |slot| {
                        let start = origin
                            + Duration::days(day)
                            + Duration::hours(8 + slot * 2)
                            + Duration::minutes((p * 7) % 90);
                        TimeInterval::new(start, start + Duration::hours(1)).unwrap()
                    })
                })
                .collect();
            PersonCalendar::new(format!("person-{}", p), busy)
        })
        .collect()
}

fn january_constraints() -> SearchConstraints {
    SearchConstraints::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        30,
    )
    .with_working_hours(
        NaiveTime::from_hms_opt(8, 0, 0),
        NaiveTime::from_hms_opt(18, 0, 0),
    )
    .with_days_of_week(DaysOfWeek::weekdays())
}

fn finder_benches(c: &mut Criterion) {
    let calendars = january_calendars();
    let constraints = january_constraints();

    c.bench_function("merge_overlapping", |b| {
        let flat = slot_finder::flatten_busy(&calendars);
        b.iter(|| black_box(merge_overlapping(black_box(&flat))))
    });

    c.bench_function("find_group_free_slots_month", |b| {
        b.iter(|| black_box(find_group_free_slots(black_box(&calendars), &constraints)))
    });
}

criterion_group!(benches, finder_benches);
criterion_main!(benches);
