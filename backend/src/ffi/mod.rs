//! PyO3 bindings
//!
//! Exposes the valuation entry point to Python. Dates cross the boundary as
//! ISO `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::SameDayPolicy;
use crate::models::PriceSchedule;
use crate::valuation::{value_contract as rust_value_contract, ContractParameters};

fn parse_schedule(pairs: Vec<(String, f64)>) -> PyResult<PriceSchedule> {
    let mut schedule = PriceSchedule::new();
    for (raw_date, price) in pairs {
        let date: NaiveDate = raw_date.parse().map_err(|e| {
            PyErr::new::<PyValueError, _>(format!("Could not parse date '{}': {}", raw_date, e))
        })?;
        schedule
            .insert(date, price)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
    }
    Ok(schedule)
}

fn parse_policy(policy: &str) -> PyResult<SameDayPolicy> {
    match policy {
        "reject" => Ok(SameDayPolicy::Reject),
        "inject_first" => Ok(SameDayPolicy::InjectFirst),
        "withdraw_first" => Ok(SameDayPolicy::WithdrawFirst),
        other => Err(PyErr::new::<PyValueError, _>(format!(
            "Invalid same_day_policy: '{}'. Must be 'reject', 'inject_first' or 'withdraw_first'",
            other
        ))),
    }
}

/// Value a storage contract
///
/// # Example (from Python)
///
/// ```python
/// from gas_storage_core_rs import value_contract
///
/// result = value_contract(
///     [("2023-06-30", 2.0)],
///     [("2024-01-31", 3.5)],
///     rate=1000, storage_cost_rate=0.005,
///     total_capacity=5000, transfer_cost_rate=0.01,
/// )
/// print(result["contract_value"])  # 405.0
/// ```
#[pyfunction]
#[pyo3(signature = (
    injections,
    withdrawals,
    rate,
    storage_cost_rate,
    total_capacity,
    transfer_cost_rate,
    end_date = None,
    same_day_policy = "reject"
))]
#[allow(clippy::too_many_arguments)]
fn value_contract(
    py: Python<'_>,
    injections: Vec<(String, f64)>,
    withdrawals: Vec<(String, f64)>,
    rate: f64,
    storage_cost_rate: f64,
    total_capacity: f64,
    transfer_cost_rate: f64,
    end_date: Option<String>,
    same_day_policy: &str,
) -> PyResult<Py<PyDict>> {
    let end_date = end_date
        .map(|raw| {
            raw.parse::<NaiveDate>().map_err(|e| {
                PyErr::new::<PyValueError, _>(format!("Could not parse end_date '{}': {}", raw, e))
            })
        })
        .transpose()?;

    let params = ContractParameters {
        rate,
        total_capacity,
        storage_cost_rate,
        transfer_cost_rate,
        end_date,
        same_day_policy: parse_policy(same_day_policy)?,
    };

    let valuation = rust_value_contract(
        &parse_schedule(injections)?,
        &parse_schedule(withdrawals)?,
        params,
    )
    .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;

    let dict = PyDict::new(py);
    dict.set_item("contract_value", valuation.contract_value)?;
    dict.set_item("final_volume", valuation.final_volume)?;
    dict.set_item("peak_volume", valuation.peak_volume)?;
    dict.set_item("log", valuation.event_log.lines())?;
    Ok(dict.into())
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(value_contract, m)?)?;
    Ok(())
}
