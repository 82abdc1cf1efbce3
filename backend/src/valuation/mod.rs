//! Valuation - contract run loop, reports and scenario batches
//!
//! See `engine.rs` for the run loop itself.

pub mod batch;
pub mod engine;
pub mod report;

// Re-export main types for convenience
pub use batch::{value_scenarios, Scenario, ScenarioOutcome};
pub use engine::{value_contract, ContractParameters, Valuation, ValuationEngine, ValuationError};
pub use report::{compute_inputs_hash, ValuationReport};
