//! herald CLI binary.
//!
//! Polls each configured novel's release feeds and announces:
//! - newly opened locked arcs (`herald arcs`)
//! - newly released extras and side stories (`herald extras`)
//!
//! Meant to run on a schedule; exits non-zero when any novel failed.

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, run_batch, show_ledger};

    // Environment first so RUST_LOG and credentials from .env apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    telemetry::init(cli.verbose, cli.log_format);

    let result = match &cli.command {
        Commands::Arcs(args) => run_batch(&cli, args, herald_bot::RunMode::Arcs).await,
        Commands::Extras(args) => run_batch(&cli, args, herald_bot::RunMode::Extras).await,
        Commands::Run(args) => run_batch(&cli, args, herald_bot::RunMode::All).await,
        Commands::Show { novel } => show_ledger(&cli, novel).await.map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "herald failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
