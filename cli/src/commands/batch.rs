use gas_storage_core_rs::{value_scenarios, Scenario, ValuationReport};
use serde_json::{json, Value};
use std::path::Path;

use crate::error::CliError;
use crate::input::{load_curve, read_json, ScenarioFile};

/// Value a scenario file; one entry per scenario, failures reported inline
pub fn run(scenarios_path: &Path, curve_path: Option<&Path>) -> Result<Value, CliError> {
    let file: ScenarioFile = read_json(scenarios_path)?;
    let curve = curve_path.map(load_curve).transpose()?;
    let scenarios = file
        .scenarios
        .into_iter()
        .map(|named| named.into_scenario(curve.as_ref()))
        .collect::<Result<Vec<Scenario>, _>>()?;

    let outcomes = value_scenarios(&scenarios);
    let mut results = Vec::with_capacity(outcomes.len());
    for (scenario, outcome) in scenarios.iter().zip(outcomes) {
        let entry = match outcome.result {
            Ok(valuation) => {
                let report = ValuationReport::from_valuation(
                    &scenario.parameters,
                    &scenario.injections,
                    &scenario.withdrawals,
                    &valuation,
                )?;
                json!({ "name": outcome.name, "report": report })
            }
            Err(error) => json!({ "name": outcome.name, "error": error.to_string() }),
        };
        results.push(entry);
    }
    Ok(Value::Array(results))
}
