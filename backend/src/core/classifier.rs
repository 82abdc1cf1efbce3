//! Event classification
//!
//! Turns each timeline date into the concrete events to execute on it, using
//! map membership in the two price schedules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::timeline::Timeline;
use crate::models::PriceSchedule;
use crate::valuation::ValuationError;

/// Direction of a scheduled transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Injection,
    Withdrawal,
}

/// A scheduled injection or withdrawal with its resolved price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub price: f64,
}

/// What to do with a date that appears in both schedules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameDayPolicy {
    /// Refuse the contract
    #[default]
    Reject,
    /// Inject, then withdraw on the same date
    InjectFirst,
    /// Withdraw, then inject on the same date
    WithdrawFirst,
}

/// Events to execute on `date`, in execution order
///
/// # Errors
/// * `ConflictingEventDate` - date is in both schedules under `SameDayPolicy::Reject`
/// * `UnscheduledDate` - date is in neither schedule
pub fn classify(
    date: NaiveDate,
    injections: &PriceSchedule,
    withdrawals: &PriceSchedule,
    policy: SameDayPolicy,
) -> Result<Vec<Event>, ValuationError> {
    let injection = injections.price_on(date).map(|price| Event {
        date,
        kind: EventKind::Injection,
        price,
    });
    let withdrawal = withdrawals.price_on(date).map(|price| Event {
        date,
        kind: EventKind::Withdrawal,
        price,
    });

    match (injection, withdrawal) {
        (Some(inj), None) => Ok(vec![inj]),
        (None, Some(wd)) => Ok(vec![wd]),
        (Some(inj), Some(wd)) => match policy {
            SameDayPolicy::Reject => Err(ValuationError::ConflictingEventDate(date)),
            SameDayPolicy::InjectFirst => Ok(vec![inj, wd]),
            SameDayPolicy::WithdrawFirst => Ok(vec![wd, inj]),
        },
        (None, None) => Err(ValuationError::UnscheduledDate(date)),
    }
}

/// Classify every timeline date before anything is executed
///
/// Returns one entry per timeline date, aligned with `timeline.dates()`.
pub fn classify_timeline(
    timeline: &Timeline,
    injections: &PriceSchedule,
    withdrawals: &PriceSchedule,
    policy: SameDayPolicy,
) -> Result<Vec<Vec<Event>>, ValuationError> {
    timeline
        .dates()
        .iter()
        .map(|date| classify(*date, injections, withdrawals, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn overlapping() -> (PriceSchedule, PriceSchedule) {
        let injections = PriceSchedule::from_pairs(vec![(date(2023, 6, 30), 2.0)]).unwrap();
        let withdrawals = PriceSchedule::from_pairs(vec![(date(2023, 6, 30), 2.5)]).unwrap();
        (injections, withdrawals)
    }

    #[test]
    fn test_single_side_dates() {
        let injections = PriceSchedule::from_pairs(vec![(date(2023, 6, 30), 2.0)]).unwrap();
        let withdrawals = PriceSchedule::from_pairs(vec![(date(2024, 1, 31), 3.5)]).unwrap();

        let events = classify(date(2024, 1, 31), &injections, &withdrawals, SameDayPolicy::Reject)
            .unwrap();
        assert_eq!(
            events,
            vec![Event {
                date: date(2024, 1, 31),
                kind: EventKind::Withdrawal,
                price: 3.5
            }]
        );
    }

    #[test]
    fn test_conflicting_date_rejected_by_default() {
        let (injections, withdrawals) = overlapping();
        let err = classify(
            date(2023, 6, 30),
            &injections,
            &withdrawals,
            SameDayPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValuationError::ConflictingEventDate(date(2023, 6, 30)));
    }

    #[test]
    fn test_conflicting_date_ordered_by_policy() {
        let (injections, withdrawals) = overlapping();

        let kinds = |policy| -> Vec<EventKind> {
            classify(date(2023, 6, 30), &injections, &withdrawals, policy)
                .unwrap()
                .iter()
                .map(|e| e.kind)
                .collect()
        };

        assert_eq!(
            kinds(SameDayPolicy::InjectFirst),
            vec![EventKind::Injection, EventKind::Withdrawal]
        );
        assert_eq!(
            kinds(SameDayPolicy::WithdrawFirst),
            vec![EventKind::Withdrawal, EventKind::Injection]
        );
    }

    #[test]
    fn test_unscheduled_date() {
        let (injections, withdrawals) = overlapping();
        let err = classify(date(2020, 1, 1), &injections, &withdrawals, SameDayPolicy::Reject)
            .unwrap_err();
        assert_eq!(err, ValuationError::UnscheduledDate(date(2020, 1, 1)));
    }
}
