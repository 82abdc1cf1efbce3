//! Interval holding charges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::timeline::days_between;
use crate::models::ContractEvent;

/// Holding cost for one interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldingCharge {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Actual calendar days in `[from, to)`
    pub days: i64,
    /// Volume held throughout the interval
    pub volume: f64,
    pub cost: f64,
}

impl HoldingCharge {
    /// Whether the charge is worth logging
    pub fn is_chargeable(&self) -> bool {
        self.cost != 0.0
    }

    pub fn to_event(&self) -> ContractEvent {
        ContractEvent::HoldingCost {
            from: self.from,
            to: self.to,
            days: self.days,
            volume: self.volume,
            cost: self.cost,
        }
    }
}

/// Cost of holding `volume` from `from` to `to`
///
/// `cost = volume × days × storage_cost_rate`
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use gas_storage_core_rs::costs::holding_charge;
///
/// let from = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let charge = holding_charge(1000.0, from, to, 0.005);
/// assert_eq!(charge.days, 215);
/// assert!((charge.cost - 1075.0).abs() < 1e-9);
/// ```
pub fn holding_charge(
    volume: f64,
    from: NaiveDate,
    to: NaiveDate,
    storage_cost_rate: f64,
) -> HoldingCharge {
    let days = days_between(from, to);
    HoldingCharge {
        from,
        to,
        days,
        volume,
        cost: volume * days as f64 * storage_cost_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_storage_costs_nothing() {
        let charge = holding_charge(0.0, date(2023, 6, 30), date(2023, 7, 31), 0.01);
        assert_eq!(charge.days, 31);
        assert_eq!(charge.cost, 0.0);
        assert!(!charge.is_chargeable());
    }

    #[test]
    fn test_same_day_interval_costs_nothing() {
        let charge = holding_charge(500.0, date(2023, 6, 30), date(2023, 6, 30), 0.01);
        assert_eq!(charge.days, 0);
        assert_eq!(charge.cost, 0.0);
    }

    #[test]
    fn test_to_event_copies_fields() {
        let charge = holding_charge(500.0, date(2023, 6, 30), date(2023, 7, 31), 0.01);
        match charge.to_event() {
            ContractEvent::HoldingCost { days, volume, cost, .. } => {
                assert_eq!(days, 31);
                assert_eq!(volume, 500.0);
                assert!((cost - 155.0).abs() < 1e-9);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
