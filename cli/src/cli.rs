//! CLI argument definitions for gas-storage.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `value` | Value one storage contract from a JSON file |
//! | `estimate` | Quote a price for a date from a month-end curve |
//! | `batch` | Value a file of named scenarios in parallel |
//!
//! # Examples
//!
//! ```bash
//! gas-storage value contract.json --pretty
//! gas-storage value contract.json --curve nat_gas.json
//! gas-storage estimate nat_gas.json 2024-08-31
//! RUST_LOG=debug gas-storage batch scenarios.json
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Natural gas storage contract valuation
#[derive(Debug, Parser)]
#[command(name = "gas-storage", author, version, about)]
pub struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Value a contract and print its report
    Value {
        /// Contract file (injections, withdrawals, parameters)
        contract: PathBuf,

        /// Month-end price curve used for events without a price
        #[arg(long)]
        curve: Option<PathBuf>,
    },

    /// Estimate the price for a date
    Estimate {
        /// Month-end price curve file
        curve: PathBuf,

        /// Date to quote (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Value every scenario in a file
    Batch {
        /// Scenario file
        scenarios: PathBuf,

        /// Month-end price curve used for events without a price
        #[arg(long)]
        curve: Option<PathBuf>,
    },
}
