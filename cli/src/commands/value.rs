use gas_storage_core_rs::{ValuationEngine, ValuationReport};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::error::CliError;
use crate::input::{load_curve, read_json, ContractFile};

pub fn run(contract_path: &Path, curve_path: Option<&Path>) -> Result<Value, CliError> {
    let contract: ContractFile = read_json(contract_path)?;
    let curve = curve_path.map(load_curve).transpose()?;
    let (injections, withdrawals) = contract.schedules(curve.as_ref())?;

    let engine = ValuationEngine::new(contract.parameters.clone())?;
    let valuation = engine.value(&injections, &withdrawals)?;
    let report =
        ValuationReport::from_valuation(&contract.parameters, &injections, &withdrawals, &valuation)?;

    info!(
        run_id = %report.run_id,
        contract_value = report.contract_value,
        "contract valued"
    );
    Ok(serde_json::to_value(report)?)
}
