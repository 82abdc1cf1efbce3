//! Cash ledger for one valuation run

use serde::{Deserialize, Serialize};

/// Running cash totals
///
/// Inflows are sale revenue only. Outflows are split by cause so callers can
/// see where the money went; `cash_out()` is their sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Revenue from withdrawals (sales)
    pub cash_in: f64,

    /// Gas purchased on injection dates
    pub purchase_cost: f64,

    /// Per-unit handling charge on both injections and withdrawals
    pub transfer_cost: f64,

    /// Time-proportional storage charge between events
    pub holding_cost: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_purchase(&mut self, amount: f64) {
        self.purchase_cost += amount;
    }

    pub fn record_sale(&mut self, amount: f64) {
        self.cash_in += amount;
    }

    pub fn record_transfer(&mut self, amount: f64) {
        self.transfer_cost += amount;
    }

    pub fn record_holding(&mut self, amount: f64) {
        self.holding_cost += amount;
    }

    /// Total outflow across all categories
    pub fn cash_out(&self) -> f64 {
        self.purchase_cost + self.transfer_cost + self.holding_cost
    }

    /// Unrounded net value
    pub fn net(&self) -> f64 {
        self.cash_in - self.cash_out()
    }
}

/// Round half away from zero to 2 decimal places
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
