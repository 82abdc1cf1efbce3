//! Valuation Engine
//!
//! Runs one storage contract through its event timeline:
//! - Timeline construction (distinct dates, ascending)
//! - Event classification (injection / withdrawal / same-day policy)
//! - Storage transitions (capacity and availability checks)
//! - Holding cost accrual between consecutive dates
//! - Cash aggregation into a single contract value
//!
//! # Run Loop
//!
//! ```text
//! validate parameters and inputs (fail fast, nothing mutated yet)
//! for each date d_i in the timeline:
//!   1. execute the date's events in order
//!      - injection:  volume + rate <= capacity ? buy + transfer cost : reject
//!      - withdrawal: volume >= rate            ? sell + transfer cost : reject
//!   2. if d_{i+1} exists (or a close-out date follows the last event):
//!      charge volume × days × storage_cost_rate
//! contract value = round(cash_in - cash_out, 2)
//! ```
//!
//! Rejected events are a normal outcome: they are logged and the run carries on.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gas_storage_core_rs::{ContractParameters, PriceSchedule, ValuationEngine};
//!
//! let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
//! let injections = PriceSchedule::from_pairs(vec![(d(2023, 6, 30), 2.0)]).unwrap();
//! let withdrawals = PriceSchedule::from_pairs(vec![(d(2024, 1, 31), 3.5)]).unwrap();
//!
//! let params = ContractParameters {
//!     rate: 1000.0,
//!     total_capacity: 5000.0,
//!     storage_cost_rate: 0.005,
//!     transfer_cost_rate: 0.01,
//!     ..Default::default()
//! };
//!
//! let engine = ValuationEngine::new(params).unwrap();
//! let valuation = engine.value(&injections, &withdrawals).unwrap();
//! assert_eq!(valuation.contract_value, 405.0);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::classifier::{classify_timeline, Event, EventKind, SameDayPolicy};
use crate::core::timeline::Timeline;
use crate::costs::holding_charge;
use crate::models::{round_to_cents, ContractEvent, EventLog, Ledger, PriceSchedule, StorageState};

// ============================================================================
// Configuration Types
// ============================================================================

/// Contract parameters for one valuation run
///
/// # Fields
///
/// * `rate` - Quantity moved by every injection or withdrawal
/// * `total_capacity` - Maximum quantity the facility can hold
/// * `storage_cost_rate` - Cost per unit per day held
/// * `transfer_cost_rate` - Cost per unit injected or withdrawn
/// * `end_date` - Optional close-out date; holding cost runs until it
/// * `same_day_policy` - Handling of dates scheduled for both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractParameters {
    pub rate: f64,

    pub total_capacity: f64,

    pub storage_cost_rate: f64,

    pub transfer_cost_rate: f64,

    /// No holding cost is charged after the last event when `None`
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub same_day_policy: SameDayPolicy,
}

impl Default for ContractParameters {
    fn default() -> Self {
        Self {
            rate: 1_000.0,
            total_capacity: 5_000.0,
            storage_cost_rate: 0.005,
            transfer_cost_rate: 0.01,
            end_date: None,
            same_day_policy: SameDayPolicy::Reject,
        }
    }
}

impl ContractParameters {
    /// Check the parameters on their own, before any schedule is seen
    pub fn validate(&self) -> Result<(), ValuationError> {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(ValuationError::InvalidParameter(format!(
                "rate must be a positive number, got {}",
                self.rate
            )));
        }

        if !self.total_capacity.is_finite() || self.total_capacity < self.rate {
            return Err(ValuationError::InvalidParameter(format!(
                "total_capacity ({}) must be at least rate ({})",
                self.total_capacity, self.rate
            )));
        }

        if !self.storage_cost_rate.is_finite() || self.storage_cost_rate < 0.0 {
            return Err(ValuationError::InvalidParameter(format!(
                "storage_cost_rate must be non-negative, got {}",
                self.storage_cost_rate
            )));
        }

        if !self.transfer_cost_rate.is_finite() || self.transfer_cost_rate < 0.0 {
            return Err(ValuationError::InvalidParameter(format!(
                "transfer_cost_rate must be non-negative, got {}",
                self.transfer_cost_rate
            )));
        }

        Ok(())
    }
}

/// Valuation error types
///
/// All of these abort the run before any state changes. Per-event capacity or
/// availability problems are not errors; they show up in the event log.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Date {0} is listed more than once in the same schedule")]
    DuplicateScheduleDate(NaiveDate),

    #[error("Invalid price {price} on {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },

    #[error("Date {0} is scheduled for both injection and withdrawal")]
    ConflictingEventDate(NaiveDate),

    #[error("Date {0} is not in either schedule")]
    UnscheduledDate(NaiveDate),

    #[error("End date {end_date} is before the last event on {last_event}")]
    EndDateBeforeLastEvent {
        end_date: NaiveDate,
        last_event: NaiveDate,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of one valuation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Net value `cash_in - cash_out`, rounded to 2 decimals
    pub contract_value: f64,

    /// Unrounded cash totals
    pub ledger: Ledger,

    /// Volume left in storage after the last event
    pub final_volume: f64,

    /// Highest volume held at any point
    pub peak_volume: f64,

    /// Every transition and holding charge, in order
    pub event_log: EventLog,
}

impl Valuation {
    /// Count of events of `event_type` in the log
    pub fn count(&self, event_type: &str) -> usize {
        self.event_log.events_of_type(event_type).len()
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Validated contract parameters, ready to value schedules
///
/// The engine holds no run state. Every call to [`ValuationEngine::value`]
/// owns a fresh storage state and ledger, so one engine can value many
/// schedules, including from several threads at once.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    params: ContractParameters,
}

/// Mutable state of a single run
struct Run<'a> {
    params: &'a ContractParameters,
    storage: StorageState,
    ledger: Ledger,
    event_log: EventLog,
}

impl ValuationEngine {
    /// Create an engine from parameters
    ///
    /// # Returns
    ///
    /// * `Ok(ValuationEngine)` - Parameters are valid
    /// * `Err(ValuationError::InvalidParameter)` - Validation failed
    pub fn new(params: ContractParameters) -> Result<Self, ValuationError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ContractParameters {
        &self.params
    }

    /// Value a contract given its injection and withdrawal schedules
    ///
    /// # Errors
    ///
    /// * `ConflictingEventDate` - a date is in both schedules under `SameDayPolicy::Reject`
    /// * `EndDateBeforeLastEvent` - the close-out date precedes the last event
    pub fn value(
        &self,
        injections: &PriceSchedule,
        withdrawals: &PriceSchedule,
    ) -> Result<Valuation, ValuationError> {
        let timeline = Timeline::build(injections, withdrawals);
        let classified =
            classify_timeline(&timeline, injections, withdrawals, self.params.same_day_policy)?;
        let close_out = self.close_out_interval(&timeline)?;

        let mut run = Run {
            params: &self.params,
            storage: StorageState::new(self.params.total_capacity),
            ledger: Ledger::new(),
            event_log: EventLog::new(),
        };

        let next_dates = timeline.dates().iter().skip(1).copied().map(Some);
        for ((date, events), next) in timeline
            .dates()
            .iter()
            .zip(&classified)
            .zip(next_dates.chain(std::iter::once(None)))
        {
            for event in events {
                run.execute(event);
            }

            match next {
                Some(next) => run.accrue(*date, next),
                None => {
                    if let Some((from, to)) = close_out {
                        run.accrue(from, to);
                    }
                }
            }
        }

        let contract_value = round_to_cents(run.ledger.net());
        info!(
            dates = timeline.len(),
            rejections = run.event_log.rejections().len(),
            final_volume = run.storage.volume(),
            contract_value,
            "contract valued"
        );

        Ok(Valuation {
            contract_value,
            final_volume: run.storage.volume(),
            peak_volume: run.storage.peak_volume(),
            ledger: run.ledger,
            event_log: run.event_log,
        })
    }

    /// Interval from the last event to the close-out date, if one is set
    fn close_out_interval(
        &self,
        timeline: &Timeline,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, ValuationError> {
        match (timeline.last(), self.params.end_date) {
            (Some(last_event), Some(end_date)) if end_date < last_event => {
                Err(ValuationError::EndDateBeforeLastEvent {
                    end_date,
                    last_event,
                })
            }
            (Some(last_event), Some(end_date)) => Ok(Some((last_event, end_date))),
            _ => Ok(None),
        }
    }
}

impl Run<'_> {
    fn execute(&mut self, event: &Event) {
        match event.kind {
            EventKind::Injection => self.inject(event.date, event.price),
            EventKind::Withdrawal => self.withdraw(event.date, event.price),
        }
    }

    fn inject(&mut self, date: NaiveDate, price: f64) {
        let quantity = self.params.rate;
        let volume = self.storage.volume();

        match self.storage.inject(quantity) {
            Ok(volume_after) => {
                let purchase_cost = quantity * price;
                let transfer_cost = quantity * self.params.transfer_cost_rate;
                self.ledger.record_purchase(purchase_cost);
                self.ledger.record_transfer(transfer_cost);
                debug!(%date, price, quantity, volume_after, "injected");
                self.event_log.log(ContractEvent::Injection {
                    date,
                    price,
                    quantity,
                    purchase_cost,
                    transfer_cost,
                    volume_after,
                });
            }
            Err(err) => {
                warn!(%date, %err, "injection rejected");
                self.event_log.log(ContractEvent::InjectionRejected {
                    date,
                    price,
                    quantity,
                    volume,
                    capacity: self.storage.capacity(),
                });
            }
        }
    }

    fn withdraw(&mut self, date: NaiveDate, price: f64) {
        let quantity = self.params.rate;
        let volume = self.storage.volume();

        match self.storage.withdraw(quantity) {
            Ok(volume_after) => {
                let revenue = quantity * price;
                let transfer_cost = quantity * self.params.transfer_cost_rate;
                self.ledger.record_sale(revenue);
                self.ledger.record_transfer(transfer_cost);
                debug!(%date, price, quantity, volume_after, "withdrew");
                self.event_log.log(ContractEvent::Withdrawal {
                    date,
                    price,
                    quantity,
                    revenue,
                    transfer_cost,
                    volume_after,
                });
            }
            Err(err) => {
                warn!(%date, %err, "withdrawal rejected");
                self.event_log.log(ContractEvent::WithdrawalRejected {
                    date,
                    price,
                    quantity,
                    volume,
                });
            }
        }
    }

    fn accrue(&mut self, from: NaiveDate, to: NaiveDate) {
        let charge = holding_charge(self.storage.volume(), from, to, self.params.storage_cost_rate);
        if charge.is_chargeable() {
            self.ledger.record_holding(charge.cost);
            self.event_log.log(charge.to_event());
        }
    }
}

/// Validate `params` and value the schedules in one call
pub fn value_contract(
    injections: &PriceSchedule,
    withdrawals: &PriceSchedule,
    params: ContractParameters,
) -> Result<Valuation, ValuationError> {
    ValuationEngine::new(params)?.value(injections, withdrawals)
}
