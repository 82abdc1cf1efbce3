//! Scenario batches
//!
//! Values several independent contracts at once. Each scenario gets its own
//! engine and run state, so scenarios are spread over the rayon pool with no
//! synchronisation between them.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::PriceSchedule;
use crate::valuation::engine::{ContractParameters, Valuation, ValuationEngine, ValuationError};

/// One named contract to value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub parameters: ContractParameters,
    pub injections: PriceSchedule,
    pub withdrawals: PriceSchedule,
}

impl Scenario {
    pub fn value(&self) -> Result<Valuation, ValuationError> {
        ValuationEngine::new(self.parameters.clone())?.value(&self.injections, &self.withdrawals)
    }
}

/// Result of one scenario in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<Valuation, ValuationError>,
}

/// Value every scenario; outcomes come back in input order
///
/// A failing scenario only fails its own outcome.
pub fn value_scenarios(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    let outcomes: Vec<ScenarioOutcome> = scenarios
        .par_iter()
        .map(|scenario| ScenarioOutcome {
            name: scenario.name.clone(),
            result: scenario.value(),
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(scenarios = outcomes.len(), failed, "batch valued");
    outcomes
}
