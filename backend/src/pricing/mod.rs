//! Price estimation
//!
//! The valuation engine only ever sees resolved prices. This module is the
//! seam where callers obtain them:
//! - `PriceEstimator`: anything that can quote a price for a date
//! - `MonthlyPriceCurve`: month-end price table with a one-year forecast
//! - `resolve_schedule`: quote a list of dates into a `PriceSchedule`

pub mod curve;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PriceSchedule;
use crate::valuation::ValuationError;

pub use curve::{month_end, CurvePoint, MonthlyPriceCurve, FORECAST_HORIZON_MONTHS};

/// Errors raised while estimating prices
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    #[error("Price curve has no observations")]
    EmptyCurve,

    #[error("Price curve needs at least {required} monthly observations, got {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Month ending {0} appears more than once in the price curve")]
    DuplicateMonth(NaiveDate),

    #[error("Invalid price {price} for {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },

    #[error("Date {date} is before the earliest observation ({first})")]
    BeforeHistory { date: NaiveDate, first: NaiveDate },

    #[error("Date {date} is more than {horizon_months} months beyond the last observation ({last})")]
    BeyondHorizon {
        date: NaiveDate,
        last: NaiveDate,
        horizon_months: u32,
    },

    #[error(transparent)]
    Schedule(#[from] ValuationError),
}

/// Whether an estimate comes from observed data or a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceKind {
    Historical,
    Forecast,
}

/// Point estimate with an optional confidence interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Month-end date the estimate refers to
    pub date: NaiveDate,
    pub price: f64,
    /// Only set for forecasts
    pub lower_bound: Option<f64>,
    /// Only set for forecasts
    pub upper_bound: Option<f64>,
    pub kind: PriceKind,
}

/// Source of price estimates for calendar dates
pub trait PriceEstimator {
    fn estimate(&self, date: NaiveDate) -> Result<PriceEstimate, PricingError>;
}

/// Quote every date through `estimator`
///
/// The schedule keeps the queried dates (not the month-end dates the
/// estimator snapped them to), so events stay on the days they were
/// requested for.
pub fn resolve_schedule<I, E>(dates: I, estimator: &E) -> Result<PriceSchedule, PricingError>
where
    I: IntoIterator<Item = NaiveDate>,
    E: PriceEstimator + ?Sized,
{
    let mut schedule = PriceSchedule::new();
    for date in dates {
        let estimate = estimator.estimate(date)?;
        schedule.insert(date, estimate.price)?;
    }
    Ok(schedule)
}
