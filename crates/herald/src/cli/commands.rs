//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// herald - arc and bonus-chapter announcements for serialized novels
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Announce new novel arcs and bonus chapters to Discord", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Announce newly opened locked arcs
    Arcs(RunArgs),

    /// Announce newly released extras and side stories
    Extras(RunArgs),

    /// Arcs, then extras
    Run(RunArgs),

    /// Print a novel's stored ledger as JSON
    Show {
        /// Novel title (case-insensitive)
        #[arg(long)]
        novel: String,
    },
}

/// Options shared by the run commands.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Only process the novel with this title (case-insensitive)
    #[arg(long)]
    pub novel: Option<String>,

    /// Print ledger changes and messages instead of writing and sending
    #[arg(long)]
    pub dry_run: bool,

    /// Write ledgers but do not commit them
    #[arg(long)]
    pub no_commit: bool,
}

/// Log output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format
    Human,
    /// One JSON object per line
    Json,
}
