//! Price schedules
//!
//! A `PriceSchedule` is the explicit date → price mapping for one side of a
//! storage contract (all injections, or all withdrawals). Prices are looked
//! up by date, never by position, so repeated prices or unsorted input lists
//! cannot shift a price onto the wrong date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::valuation::ValuationError;

/// Date-keyed prices for one side of the contract
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use gas_storage_core_rs::PriceSchedule;
///
/// let june = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
/// let schedule = PriceSchedule::from_pairs(vec![(june, 2.0)]).unwrap();
/// assert_eq!(schedule.price_on(june), Some(2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSchedule {
    prices: BTreeMap<NaiveDate, f64>,
}

impl PriceSchedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from `(date, price)` pairs in any order
    ///
    /// # Errors
    /// * `DuplicateScheduleDate` - the same date is listed twice
    /// * `InvalidPrice` - a price is NaN or infinite
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ValuationError>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut schedule = Self::new();
        for (date, price) in pairs {
            schedule.insert(date, price)?;
        }
        Ok(schedule)
    }

    /// Add one dated price
    pub fn insert(&mut self, date: NaiveDate, price: f64) -> Result<(), ValuationError> {
        if !price.is_finite() {
            return Err(ValuationError::InvalidPrice { date, price });
        }
        if self.prices.contains_key(&date) {
            return Err(ValuationError::DuplicateScheduleDate(date));
        }
        self.prices.insert(date, price);
        Ok(())
    }

    /// Price scheduled for `date`, if any
    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.prices.get(&date).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.prices.contains_key(&date)
    }

    /// Scheduled dates in ascending order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.prices.keys().copied()
    }

    /// `(date, price)` pairs in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.prices.iter().map(|(d, p)| (*d, *p))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
