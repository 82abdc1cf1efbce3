//! Month-end price curve
//!
//! Holds one observed price per calendar month (keyed by month end) and
//! answers two kinds of query:
//!
//! ```text
//! first <= month_end(d) <= last        -> observed price (nearest month if missing)
//! last  <  month_end(d) <= last + 12m  -> seasonal-naive forecast with drift
//! ```
//!
//! The forecast takes the price of the same month one year earlier and adds
//! the average year-over-year change of the whole curve. Its interval is
//! ±1.96 sample standard deviations of those year-over-year changes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{PriceEstimate, PriceEstimator, PriceKind, PricingError};

/// Furthest a forecast may reach past the last observation
pub const FORECAST_HORIZON_MONTHS: u32 = 12;

/// Observations required to build a curve (one full seasonal cycle)
pub const MIN_OBSERVATIONS: usize = 12;

const Z_95: f64 = 1.96;

/// One dated price as read from a curve file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Last calendar day of `date`'s month
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Month end `months` months before `date`'s month
fn months_before(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = month_index(date) - months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).map(month_end)
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Price table keyed by month end
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPriceCurve {
    prices: BTreeMap<NaiveDate, f64>,
    /// Mean of the year-over-year changes
    drift: f64,
    /// Sample standard deviation of the year-over-year changes
    yoy_std_dev: f64,
}

impl MonthlyPriceCurve {
    /// Build a curve from dated prices; dates snap to their month end
    ///
    /// # Errors
    /// * `EmptyCurve` / `InsufficientHistory` - fewer than 12 observations
    /// * `DuplicateMonth` - two observations fall in the same month
    /// * `InvalidPrice` - a price is NaN or infinite
    pub fn new<I>(observations: I) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = CurvePoint>,
    {
        let mut prices = BTreeMap::new();
        for point in observations {
            if !point.price.is_finite() {
                return Err(PricingError::InvalidPrice {
                    date: point.date,
                    price: point.price,
                });
            }
            let key = month_end(point.date);
            if prices.insert(key, point.price).is_some() {
                return Err(PricingError::DuplicateMonth(key));
            }
        }

        if prices.is_empty() {
            return Err(PricingError::EmptyCurve);
        }
        if prices.len() < MIN_OBSERVATIONS {
            return Err(PricingError::InsufficientHistory {
                required: MIN_OBSERVATIONS,
                available: prices.len(),
            });
        }

        let changes: Vec<f64> = prices
            .iter()
            .filter_map(|(date, price)| {
                let year_before = months_before(*date, 12)?;
                prices.get(&year_before).map(|earlier| price - earlier)
            })
            .collect();

        let (drift, yoy_std_dev) = mean_and_std_dev(&changes);
        Ok(Self {
            prices,
            drift,
            yoy_std_dev,
        })
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Observation closest to `target`; ties go to the earlier month
    fn nearest(&self, target: NaiveDate) -> Option<(NaiveDate, f64)> {
        let before = self.prices.range(..=target).next_back();
        let after = self.prices.range(target..).next();
        match (before, after) {
            (Some((bd, bp)), Some((ad, ap))) => {
                if (target - *bd) <= (*ad - target) {
                    Some((*bd, *bp))
                } else {
                    Some((*ad, *ap))
                }
            }
            (Some((d, p)), None) | (None, Some((d, p))) => Some((*d, *p)),
            (None, None) => None,
        }
    }
}

impl PriceEstimator for MonthlyPriceCurve {
    fn estimate(&self, date: NaiveDate) -> Result<PriceEstimate, PricingError> {
        let target = month_end(date);
        let (first, last) = match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(PricingError::EmptyCurve),
        };

        if target < first {
            return Err(PricingError::BeforeHistory { date, first });
        }

        let months_ahead = month_index(target) - month_index(last);
        if months_ahead > FORECAST_HORIZON_MONTHS as i32 {
            return Err(PricingError::BeyondHorizon {
                date,
                last,
                horizon_months: FORECAST_HORIZON_MONTHS,
            });
        }

        if target <= last {
            let (observed, price) = self.nearest(target).ok_or(PricingError::EmptyCurve)?;
            return Ok(PriceEstimate {
                date: observed,
                price: round4(price),
                lower_bound: None,
                upper_bound: None,
                kind: PriceKind::Historical,
            });
        }

        let base_date = months_before(target, 12).unwrap_or(last);
        let (_, base) = self.nearest(base_date).ok_or(PricingError::EmptyCurve)?;
        let price = base + self.drift;
        let half_width = Z_95 * self.yoy_std_dev;

        Ok(PriceEstimate {
            date: target,
            price: round4(price),
            lower_bound: Some(round4(price - half_width)),
            upper_bound: Some(round4(price + half_width)),
            kind: PriceKind::Forecast,
        })
    }
}

fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}
