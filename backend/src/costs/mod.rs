//! Holding cost accrual
//!
//! Storage is charged per unit of gas per calendar day held. Charges are
//! computed for the interval between two consecutive event dates using the
//! volume left in storage after the earlier date's events.

pub mod accrual;

// Re-exports
pub use accrual::{holding_charge, HoldingCharge};
