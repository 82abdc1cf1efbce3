use chrono::NaiveDate;
use gas_storage_core_rs::PriceEstimator;
use serde_json::Value;
use std::path::Path;

use crate::error::CliError;
use crate::input::load_curve;

pub fn run(curve_path: &Path, date: NaiveDate) -> Result<Value, CliError> {
    let curve = load_curve(curve_path)?;
    let estimate = curve.estimate(date)?;
    Ok(serde_json::to_value(estimate)?)
}
