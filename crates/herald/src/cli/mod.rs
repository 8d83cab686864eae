//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the herald binary.

mod commands;
mod run;
mod show;

pub use commands::{Cli, Commands, LogFormat, RunArgs};
pub use run::run_batch;
pub use show::show_ledger;
