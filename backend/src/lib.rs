//! Gas Storage Core - Rust Engine
//!
//! Values natural-gas storage contracts by simulating injections and
//! withdrawals over the contract's event dates.
//!
//! # Architecture
//!
//! - **core**: Timeline construction and event classification
//! - **models**: Domain types (PriceSchedule, StorageState, Ledger, EventLog)
//! - **costs**: Holding cost accrual between event dates
//! - **valuation**: Run loop, reports and parallel scenario batches
//! - **pricing**: Price estimation seam and a month-end price curve
//!
//! # Critical Invariants
//!
//! 1. Stored volume stays within `[0, total_capacity]` after every event
//! 2. Events are processed strictly in date order; each date exactly once
//! 3. Invalid inputs abort before any state changes; infeasible events do not abort

// Module declarations
pub mod core;
pub mod costs;
pub mod models;
pub mod pricing;
pub mod valuation;

// Re-exports for convenience
pub use crate::core::{Event, EventKind, SameDayPolicy, Timeline};
pub use models::{ContractEvent, EventLog, Ledger, PriceSchedule, StorageError, StorageState};
pub use pricing::{
    resolve_schedule, CurvePoint, MonthlyPriceCurve, PriceEstimate, PriceEstimator, PriceKind,
    PricingError,
};
pub use valuation::{
    value_contract, value_scenarios, ContractParameters, Scenario, ScenarioOutcome, Valuation,
    ValuationEngine, ValuationError, ValuationReport,
};

// FFI module (when feature enabled)
#[cfg(feature = "python")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn gas_storage_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(m)
}
