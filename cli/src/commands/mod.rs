//! Command handlers. Each returns the JSON document printed on stdout.

mod batch;
mod estimate;
mod value;

use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<Value, CliError> {
    match &cli.command {
        Command::Value { contract, curve } => value::run(contract, curve.as_deref()),
        Command::Estimate { curve, date } => estimate::run(curve, *date),
        Command::Batch { scenarios, curve } => batch::run(scenarios, curve.as_deref()),
    }
}
