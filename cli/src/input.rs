//! Input file formats
//!
//! Contract file:
//!
//! ```json
//! {
//!   "injections":  [{ "date": "2023-06-30", "price": 2.0 }],
//!   "withdrawals": [{ "date": "2024-01-31" }],
//!   "parameters": {
//!     "rate": 1000, "total_capacity": 5000,
//!     "storage_cost_rate": 0.005, "transfer_cost_rate": 0.01
//!   }
//! }
//! ```
//!
//! Events without a `price` are quoted from the `--curve` file, a list of
//! `{ "date", "price" }` month-end observations. A scenario file wraps named
//! contracts: `{ "scenarios": [{ "name": "...", ...contract }] }`.

use chrono::NaiveDate;
use gas_storage_core_rs::{
    ContractParameters, CurvePoint, MonthlyPriceCurve, PriceEstimator, PriceSchedule, Scenario,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub date: NaiveDate,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractFile {
    #[serde(default)]
    pub injections: Vec<EventInput>,
    #[serde(default)]
    pub withdrawals: Vec<EventInput>,
    pub parameters: ContractParameters,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedContract {
    pub name: String,
    #[serde(flatten)]
    pub contract: ContractFile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFile {
    pub scenarios: Vec<NamedContract>,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn load_curve(path: &Path) -> Result<MonthlyPriceCurve, CliError> {
    let points: Vec<CurvePoint> = read_json(path)?;
    debug!(observations = points.len(), path = %path.display(), "loaded price curve");
    Ok(MonthlyPriceCurve::new(points)?)
}

fn to_schedule(
    events: &[EventInput],
    curve: Option<&MonthlyPriceCurve>,
) -> Result<PriceSchedule, CliError> {
    let mut schedule = PriceSchedule::new();
    for event in events {
        let price = match (event.price, curve) {
            (Some(price), _) => price,
            (None, Some(curve)) => curve.estimate(event.date)?.price,
            (None, None) => return Err(CliError::MissingPrice(event.date)),
        };
        schedule.insert(event.date, price)?;
    }
    Ok(schedule)
}

impl ContractFile {
    /// Injection and withdrawal schedules with every price resolved
    pub fn schedules(
        &self,
        curve: Option<&MonthlyPriceCurve>,
    ) -> Result<(PriceSchedule, PriceSchedule), CliError> {
        Ok((
            to_schedule(&self.injections, curve)?,
            to_schedule(&self.withdrawals, curve)?,
        ))
    }
}

impl NamedContract {
    pub fn into_scenario(self, curve: Option<&MonthlyPriceCurve>) -> Result<Scenario, CliError> {
        let (injections, withdrawals) = self.contract.schedules(curve)?;
        Ok(Scenario {
            name: self.name,
            parameters: self.contract.parameters,
            injections,
            withdrawals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONTRACT: &str = r#"{
        "injections": [{ "date": "2023-06-30", "price": 2.0 }],
        "withdrawals": [{ "date": "2024-01-31", "price": 3.5 }],
        "parameters": {
            "rate": 1000,
            "total_capacity": 5000,
            "storage_cost_rate": 0.005,
            "transfer_cost_rate": 0.01
        }
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_contract_file_defaults() {
        let file = write_temp(CONTRACT);
        let contract: ContractFile = read_json(file.path()).unwrap();

        assert_eq!(contract.parameters.end_date, None);
        assert_eq!(
            contract.parameters.same_day_policy,
            gas_storage_core_rs::SameDayPolicy::Reject
        );

        let (injections, withdrawals) = contract.schedules(None).unwrap();
        let valuation = gas_storage_core_rs::value_contract(
            &injections,
            &withdrawals,
            contract.parameters.clone(),
        )
        .unwrap();
        assert_eq!(valuation.contract_value, 405.0);
    }

    #[test]
    fn test_missing_price_without_curve() {
        let contract: ContractFile = serde_json::from_str(
            r#"{ "withdrawals": [{ "date": "2024-01-31" }],
                 "parameters": { "rate": 1, "total_capacity": 1,
                                 "storage_cost_rate": 0, "transfer_cost_rate": 0 } }"#,
        )
        .unwrap();

        let err = contract.schedules(None).unwrap_err();
        assert!(matches!(err, CliError::MissingPrice(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_json::<ContractFile>(Path::new("/nonexistent/contract.json")).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }
}
