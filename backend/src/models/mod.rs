//! Domain models for the storage contract valuation

pub mod event;
pub mod ledger;
pub mod schedule;
pub mod storage;

// Re-exports
pub use event::{ContractEvent, EventLog};
pub use ledger::{round_to_cents, Ledger};
pub use schedule::PriceSchedule;
pub use storage::{StorageError, StorageState};
