//! Event timeline for a storage contract
//!
//! The valuation runs over calendar dates, not ticks. This module merges the
//! injection and withdrawal schedules into one ascending list of distinct
//! dates and provides the day-count used for holding costs.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::PriceSchedule;

/// Ascending, duplicate-free event dates of one contract
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use gas_storage_core_rs::{PriceSchedule, Timeline};
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
/// let injections = PriceSchedule::from_pairs(vec![(d(7, 31), 2.1), (d(6, 30), 2.0)]).unwrap();
/// let withdrawals = PriceSchedule::from_pairs(vec![(d(6, 30), 2.2)]).unwrap();
///
/// let timeline = Timeline::build(&injections, &withdrawals);
/// assert_eq!(timeline.dates(), &[d(6, 30), d(7, 31)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    dates: Vec<NaiveDate>,
}

impl Timeline {
    /// Union of both schedules' dates, sorted ascending
    pub fn build(injections: &PriceSchedule, withdrawals: &PriceSchedule) -> Self {
        let dates: BTreeSet<NaiveDate> = injections.dates().chain(withdrawals.dates()).collect();
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Consecutive `(d_i, d_{i+1})` pairs
    pub fn intervals(&self) -> impl Iterator<Item = (NaiveDate, NaiveDate)> + '_ {
        self.dates.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Actual calendar days from `from` to `to` (no day-count convention)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_spans_leap_day() {
        assert_eq!(days_between(date(2023, 6, 30), date(2024, 1, 31)), 215);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2024, 1, 31), date(2024, 1, 31)), 0);
    }

    #[test]
    fn test_empty_schedules_give_empty_timeline() {
        let timeline = Timeline::build(&PriceSchedule::new(), &PriceSchedule::new());
        assert!(timeline.is_empty());
        assert_eq!(timeline.intervals().count(), 0);
        assert_eq!(timeline.first(), None);
    }

    #[test]
    fn test_intervals_pair_neighbours() {
        let injections =
            PriceSchedule::from_pairs(vec![(date(2023, 5, 31), 1.0), (date(2023, 6, 30), 1.0)])
                .unwrap();
        let withdrawals = PriceSchedule::from_pairs(vec![(date(2024, 1, 31), 3.0)]).unwrap();

        let timeline = Timeline::build(&injections, &withdrawals);
        let intervals: Vec<_> = timeline.intervals().collect();
        assert_eq!(
            intervals,
            vec![
                (date(2023, 5, 31), date(2023, 6, 30)),
                (date(2023, 6, 30), date(2024, 1, 31)),
            ]
        );
    }
}
