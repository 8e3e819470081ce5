//! Tests for per-person calendars and the group busy union.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use slot_finder::{
    find_free_slots, find_group_free_slots, flatten_busy, group_busy_blocks, BusyInterval,
    FinderError, PersonCalendar, PrivacyLevel, SearchConstraints, TimeInterval,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn interval(start: &str, end: &str) -> TimeInterval {
    TimeInterval::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}

fn person(id: &str, busy: Vec<TimeInterval>) -> PersonCalendar {
    PersonCalendar::new(id, busy)
}

fn workday() -> SearchConstraints {
    let day = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
    SearchConstraints::new(day, day, 30).with_working_hours(
        NaiveTime::from_hms_opt(8, 0, 0),
        NaiveTime::from_hms_opt(17, 0, 0),
    )
}

// ── Group free slots ────────────────────────────────────────────────────────

#[test]
fn one_person_matches_flat_search() {
    let busy = vec![
        interval("2025-03-17T09:00:00Z", "2025-03-17T10:00:00Z"),
        interval("2025-03-17T14:00:00Z", "2025-03-17T15:00:00Z"),
    ];
    let calendars = vec![person("alice", busy.clone())];

    let group = find_group_free_slots(&calendars, &workday()).unwrap();
    let direct = find_free_slots(&busy, &workday()).unwrap();

    assert_eq!(group, direct);
    assert_eq!(group.len(), 3);
}

#[test]
fn any_person_busy_blocks_the_group() {
    let calendars = vec![
        person(
            "alice",
            vec![interval("2025-03-17T09:00:00Z", "2025-03-17T10:00:00Z")],
        ),
        person(
            "bob",
            vec![interval("2025-03-17T14:00:00Z", "2025-03-17T15:00:00Z")],
        ),
    ];

    let slots = find_group_free_slots(&calendars, &workday()).unwrap();

    let durations: Vec<i64> = slots.iter().map(|s| s.duration_minutes).collect();
    assert_eq!(durations, vec![60, 240, 120]); // 08-09, 10-14, 15-17
}

#[test]
fn back_to_back_meetings_of_different_people_leave_no_gap() {
    let calendars = vec![
        person(
            "alice",
            vec![interval("2025-03-17T09:00:00Z", "2025-03-17T10:00:00Z")],
        ),
        person(
            "bob",
            vec![interval("2025-03-17T10:00:00Z", "2025-03-17T11:00:00Z")],
        ),
    ];

    let slots = find_group_free_slots(&calendars, &workday()).unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(
        slots[1].start,
        Utc.with_ymd_and_hms(2025, 3, 17, 11, 0, 0).unwrap()
    );
}

#[test]
fn no_calendars_leaves_working_hours_free() {
    let slots = find_group_free_slots(&[], &workday()).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].duration_minutes, 540);
}

#[test]
fn flatten_drops_ownership() {
    let calendars = vec![
        person(
            "alice",
            vec![interval("2025-03-17T09:00:00Z", "2025-03-17T10:00:00Z")],
        ),
        person(
            "bob",
            vec![
                interval("2025-03-17T09:30:00Z", "2025-03-17T10:30:00Z"),
                interval("2025-03-17T12:00:00Z", "2025-03-17T13:00:00Z"),
            ],
        ),
    ];
    assert_eq!(flatten_busy(&calendars).len(), 3);
}

// ── Busy intervals ──────────────────────────────────────────────────────────

#[test]
fn busy_interval_rejects_inverted_range() {
    let start = Utc.with_ymd_and_hms(2025, 3, 17, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap();
    assert!(matches!(
        BusyInterval::new("alice", start, end),
        Err(FinderError::InvalidInterval { .. })
    ));
}

#[test]
fn calendar_tags_intervals_with_owner() {
    let cal = person(
        "carol",
        vec![
            interval("2025-03-17T09:00:00Z", "2025-03-17T10:00:00Z"),
            interval("2025-03-17T11:00:00Z", "2025-03-17T12:00:00Z"),
        ],
    );
    let tagged: Vec<BusyInterval> = cal.busy_intervals().collect();
    assert_eq!(tagged.len(), 2);
    assert!(tagged.iter().all(|b| b.person_id == "carol"));
    assert_eq!(
        TimeInterval::from(tagged[1].clone()),
        interval("2025-03-17T11:00:00Z", "2025-03-17T12:00:00Z")
    );
}

#[test]
fn calendar_deserializes_and_validates_intervals() {
    let ok = r#"{"person_id":"dave","busy":[{"start":"2025-03-17T09:00:00Z","end":"2025-03-17T10:00:00Z"}]}"#;
    let cal: PersonCalendar = serde_json::from_str(ok).unwrap();
    assert_eq!(cal.busy.len(), 1);

    let bad = r#"{"person_id":"dave","busy":[{"start":"2025-03-17T10:00:00Z","end":"2025-03-17T10:00:00Z"}]}"#;
    assert!(serde_json::from_str::<PersonCalendar>(bad).is_err());
}

// ── Busy blocks ─────────────────────────────────────────────────────────────

#[test]
fn busy_blocks_count_people_under_full_privacy() {
    let calendars = vec![
        person(
            "alice",
            vec![interval("2025-03-17T09:00:00Z", "2025-03-17T11:00:00Z")],
        ),
        person(
            "bob",
            vec![
                interval("2025-03-17T10:00:00Z", "2025-03-17T12:00:00Z"),
                interval("2025-03-17T10:30:00Z", "2025-03-17T11:30:00Z"),
            ],
        ),
        person(
            "carol",
            vec![interval("2025-03-17T15:00:00Z", "2025-03-17T16:00:00Z")],
        ),
    ];

    let blocks = group_busy_blocks(&calendars, &workday(), PrivacyLevel::Full).unwrap();

    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[0].start,
        Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap()
    );
    assert_eq!(
        blocks[0].end,
        Utc.with_ymd_and_hms(2025, 3, 17, 12, 0, 0).unwrap()
    );
    assert_eq!(blocks[0].person_count, 2, "bob counted once");
    assert_eq!(blocks[1].person_count, 1);
}

#[test]
fn busy_blocks_hide_people_under_opaque_privacy() {
    let calendars = vec![
        person(
            "alice",
            vec![interval("2025-03-17T09:00:00Z", "2025-03-17T11:00:00Z")],
        ),
        person(
            "bob",
            vec![interval("2025-03-17T10:00:00Z", "2025-03-17T12:00:00Z")],
        ),
    ];

    let blocks = group_busy_blocks(&calendars, &workday(), PrivacyLevel::default()).unwrap();

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].person_count, 0);
}

#[test]
fn busy_blocks_are_clipped_to_search_range() {
    let calendars = vec![person(
        "alice",
        vec![interval("2025-03-16T20:00:00Z", "2025-03-17T02:00:00Z")],
    )];

    let blocks = group_busy_blocks(&calendars, &workday(), PrivacyLevel::Full).unwrap();

    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].start,
        Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap()
    );
    assert_eq!(
        blocks[0].end,
        Utc.with_ymd_and_hms(2025, 3, 17, 2, 0, 0).unwrap()
    );
}

#[test]
fn busy_blocks_validate_constraints() {
    let bad = SearchConstraints {
        min_duration_minutes: 0,
        ..workday()
    };
    assert_eq!(
        group_busy_blocks(&[], &bad, PrivacyLevel::Full).unwrap_err(),
        FinderError::InvalidDuration(0)
    );
}

#[test]
fn privacy_level_uses_lowercase_names() {
    let level: PrivacyLevel = serde_json::from_str(r#""full""#).unwrap();
    assert_eq!(level, PrivacyLevel::Full);
}
