use chrono::NaiveDate;
use gas_storage_core_rs::{PricingError, ValuationError};
use std::path::PathBuf;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("no price given for {0} and no --curve to estimate it")]
    MissingPrice(NaiveDate),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Valuation(_) => 2,
            Self::MissingPrice(_) => 2,
            Self::Pricing(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io { .. } => 10,
        }
    }
}
