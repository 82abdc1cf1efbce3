//! Valuation Report - serialisable summary of a run
//!
//! # Critical Invariants
//!
//! - **Reproducibility**: `inputs_hash` depends only on the parameters and the
//!   two schedules, never on map iteration order or the run id
//! - **Consistency**: counts and totals are taken from the same `Valuation`
//!   the value was computed from

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::{round_to_cents, PriceSchedule};
use crate::valuation::engine::{ContractParameters, Valuation, ValuationError};

/// Report of one valuation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    /// Unique id of this run
    pub run_id: Uuid,

    /// SHA256 of the canonical JSON of parameters + schedules
    pub inputs_hash: String,

    pub contract_value: f64,

    /// Sale revenue, rounded to 2 decimals
    pub cash_in: f64,

    /// Purchases + transfer + holding costs, rounded to 2 decimals
    pub cash_out: f64,

    pub purchase_cost: f64,
    pub transfer_cost: f64,
    pub holding_cost: f64,

    pub final_volume: f64,
    pub peak_volume: f64,

    pub injections_accepted: usize,
    pub injections_rejected: usize,
    pub withdrawals_accepted: usize,
    pub withdrawals_rejected: usize,

    /// Human-readable event log
    pub log: Vec<String>,
}

/// Everything a valuation depends on, hashed for `inputs_hash`
#[derive(Serialize)]
struct HashedInputs<'a> {
    parameters: &'a ContractParameters,
    injections: &'a PriceSchedule,
    withdrawals: &'a PriceSchedule,
}

impl ValuationReport {
    pub fn from_valuation(
        params: &ContractParameters,
        injections: &PriceSchedule,
        withdrawals: &PriceSchedule,
        valuation: &Valuation,
    ) -> Result<Self, ValuationError> {
        let inputs_hash = compute_inputs_hash(&HashedInputs {
            parameters: params,
            injections,
            withdrawals,
        })?;
        let ledger = &valuation.ledger;

        Ok(Self {
            run_id: Uuid::new_v4(),
            inputs_hash,
            contract_value: valuation.contract_value,
            cash_in: round_to_cents(ledger.cash_in),
            cash_out: round_to_cents(ledger.cash_out()),
            purchase_cost: round_to_cents(ledger.purchase_cost),
            transfer_cost: round_to_cents(ledger.transfer_cost),
            holding_cost: round_to_cents(ledger.holding_cost),
            final_volume: valuation.final_volume,
            peak_volume: valuation.peak_volume,
            injections_accepted: valuation.count("Injection"),
            injections_rejected: valuation.count("InjectionRejected"),
            withdrawals_accepted: valuation.count("Withdrawal"),
            withdrawals_rejected: valuation.count("WithdrawalRejected"),
            log: valuation.event_log.lines(),
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ValuationError> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|e| ValuationError::Serialization(format!("Report serialization failed: {}", e)))
    }
}

/// Compute deterministic SHA256 hash of any serialisable input
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field or map ordering.
pub fn compute_inputs_hash<T: Serialize>(inputs: &T) -> Result<String, ValuationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(inputs).map_err(|e| {
        ValuationError::Serialization(format!("Input serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        ValuationError::Serialization(format!("Input serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
