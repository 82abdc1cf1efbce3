//! Event logging for valuation runs.
//!
//! Every transition the engine performs (or refuses to perform) is written to
//! an `EventLog`. The log is the diagnostic record of a run:
//! - which injections and withdrawals went through
//! - which were rejected for capacity or availability, and why
//! - what holding cost was charged for each interval
//!
//! Each entry renders as one human-readable line through `Display`.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gas_storage_core_rs::models::ContractEvent;
//!
//! let event = ContractEvent::Injection {
//!     date: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
//!     price: 2.0,
//!     quantity: 1000.0,
//!     purchase_cost: 2000.0,
//!     transfer_cost: 10.0,
//!     volume_after: 1000.0,
//! };
//!
//! assert_eq!(
//!     event.to_string(),
//!     "Injected 1000 units on 2023-06-30 at a price of $2.0000"
//! );
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One logged state change (or refused change) of a valuation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContractEvent {
    /// Gas bought and stored
    Injection {
        date: NaiveDate,
        price: f64,
        quantity: f64,
        purchase_cost: f64,
        transfer_cost: f64,
        volume_after: f64,
    },

    /// Injection skipped: the full quantity would not fit
    InjectionRejected {
        date: NaiveDate,
        price: f64,
        quantity: f64,
        volume: f64,
        capacity: f64,
    },

    /// Gas removed and sold
    Withdrawal {
        date: NaiveDate,
        price: f64,
        quantity: f64,
        revenue: f64,
        transfer_cost: f64,
        volume_after: f64,
    },

    /// Withdrawal skipped: not enough gas stored
    WithdrawalRejected {
        date: NaiveDate,
        price: f64,
        quantity: f64,
        volume: f64,
    },

    /// Storage charge for the volume held over `[from, to)`
    HoldingCost {
        from: NaiveDate,
        to: NaiveDate,
        days: i64,
        volume: f64,
        cost: f64,
    },
}

impl ContractEvent {
    /// Date the event is attributed to (interval start for holding costs)
    pub fn date(&self) -> NaiveDate {
        match self {
            ContractEvent::Injection { date, .. } => *date,
            ContractEvent::InjectionRejected { date, .. } => *date,
            ContractEvent::Withdrawal { date, .. } => *date,
            ContractEvent::WithdrawalRejected { date, .. } => *date,
            ContractEvent::HoldingCost { from, .. } => *from,
        }
    }

    /// Short name of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            ContractEvent::Injection { .. } => "Injection",
            ContractEvent::InjectionRejected { .. } => "InjectionRejected",
            ContractEvent::Withdrawal { .. } => "Withdrawal",
            ContractEvent::WithdrawalRejected { .. } => "WithdrawalRejected",
            ContractEvent::HoldingCost { .. } => "HoldingCost",
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ContractEvent::InjectionRejected { .. } | ContractEvent::WithdrawalRejected { .. }
        )
    }
}

impl fmt::Display for ContractEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractEvent::Injection {
                date,
                price,
                quantity,
                ..
            } => write!(
                f,
                "Injected {} units on {} at a price of ${:.4}",
                quantity, date, price
            ),
            ContractEvent::InjectionRejected {
                date,
                quantity,
                volume,
                capacity,
                ..
            } => write!(
                f,
                "Injection is not possible on {}: insufficient space in the storage facility \
                 (requested {}, free {})",
                date,
                quantity,
                capacity - volume
            ),
            ContractEvent::Withdrawal {
                date,
                price,
                quantity,
                ..
            } => write!(
                f,
                "Withdrew {} units on {} at a price of ${:.4}",
                quantity, date, price
            ),
            ContractEvent::WithdrawalRejected {
                date,
                quantity,
                volume,
                ..
            } => write!(
                f,
                "Withdrawal is not possible on {}: insufficient gas in storage \
                 (requested {}, stored {})",
                date, quantity, volume
            ),
            ContractEvent::HoldingCost {
                from,
                to,
                days,
                volume,
                cost,
            } => write!(
                f,
                "Holding cost of ${:.2} for {} units over {} days ({} to {})",
                cost, volume, days, from, to
            ),
        }
    }
}

/// Event log for storing and querying valuation events.
///
/// This is a simple wrapper around `Vec<ContractEvent>` with convenience methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<ContractEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: ContractEvent) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events in the order they happened
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Get events attributed to a specific date
    pub fn events_on(&self, date: NaiveDate) -> Vec<&ContractEvent> {
        self.events.iter().filter(|e| e.date() == date).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&ContractEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get rejected injections and withdrawals
    pub fn rejections(&self) -> Vec<&ContractEvent> {
        self.events.iter().filter(|e| e.is_rejection()).collect()
    }

    /// Render every event as a human-readable line
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}
