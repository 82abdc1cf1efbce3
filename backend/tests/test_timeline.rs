//! Integration tests for timeline construction and event classification

use chrono::NaiveDate;
use gas_storage_core_rs::core::{classify_timeline, days_between};
use gas_storage_core_rs::{EventKind, PriceSchedule, SameDayPolicy, Timeline};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_timeline_merges_and_sorts_both_schedules() {
    let injections = PriceSchedule::from_pairs(vec![
        (date(2023, 7, 31), 2.1),
        (date(2023, 5, 31), 1.9),
    ])
    .unwrap();
    let withdrawals = PriceSchedule::from_pairs(vec![
        (date(2024, 1, 31), 3.5),
        (date(2023, 12, 31), 3.2),
    ])
    .unwrap();

    let timeline = Timeline::build(&injections, &withdrawals);

    assert_eq!(
        timeline.dates(),
        &[
            date(2023, 5, 31),
            date(2023, 7, 31),
            date(2023, 12, 31),
            date(2024, 1, 31)
        ]
    );
    assert_eq!(timeline.first(), Some(date(2023, 5, 31)));
    assert_eq!(timeline.last(), Some(date(2024, 1, 31)));
}

#[test]
fn test_shared_date_appears_once() {
    let injections = PriceSchedule::from_pairs(vec![(date(2023, 6, 30), 2.0)]).unwrap();
    let withdrawals = PriceSchedule::from_pairs(vec![(date(2023, 6, 30), 2.5)]).unwrap();

    let timeline = Timeline::build(&injections, &withdrawals);
    assert_eq!(timeline.len(), 1);
}

#[test]
fn test_classified_prices_follow_their_dates() {
    // Repeated prices must not confuse the lookup
    let injections = PriceSchedule::from_pairs(vec![
        (date(2023, 5, 31), 2.0),
        (date(2023, 6, 30), 2.0),
    ])
    .unwrap();
    let withdrawals = PriceSchedule::from_pairs(vec![(date(2023, 12, 31), 2.0)]).unwrap();

    let timeline = Timeline::build(&injections, &withdrawals);
    let classified =
        classify_timeline(&timeline, &injections, &withdrawals, SameDayPolicy::Reject).unwrap();

    let kinds: Vec<_> = classified.iter().map(|events| events[0].kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Injection, EventKind::Injection, EventKind::Withdrawal]
    );
    for (events, day) in classified.iter().zip(timeline.dates()) {
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, *day);
    }
}

#[test]
fn test_classify_timeline_fails_on_conflict() {
    let injections = PriceSchedule::from_pairs(vec![(date(2023, 6, 30), 2.0)]).unwrap();
    let withdrawals = PriceSchedule::from_pairs(vec![(date(2023, 6, 30), 2.5)]).unwrap();
    let timeline = Timeline::build(&injections, &withdrawals);

    assert!(
        classify_timeline(&timeline, &injections, &withdrawals, SameDayPolicy::Reject).is_err()
    );
    let both =
        classify_timeline(&timeline, &injections, &withdrawals, SameDayPolicy::InjectFirst)
            .unwrap();
    assert_eq!(both[0].len(), 2);
}

#[test]
fn test_days_between_is_actual_calendar_days() {
    // No 30/360 adjustment
    assert_eq!(days_between(date(2023, 1, 31), date(2023, 2, 28)), 28);
    assert_eq!(days_between(date(2023, 1, 1), date(2024, 1, 1)), 365);
    assert_eq!(days_between(date(2024, 1, 1), date(2025, 1, 1)), 366);
}
