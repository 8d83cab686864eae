//! Ledger inspection.

use super::commands::Cli;
use herald_bot::{BatchRunner, DiscordCredentials, HeraldConfig, RunOptions, Services};
use herald_error::{HeraldResult, JsonError};

/// Prints the stored ledger of `novel` as pretty JSON.
pub async fn show_ledger(cli: &Cli, novel: &str) -> HeraldResult<()> {
    let config = HeraldConfig::load(cli.config.as_deref())?;
    // Read-only: the dry-run wiring needs no credentials and sends nothing
    let options = RunOptions {
        novel: Some(novel.to_string()),
        dry_run: true,
        commit: false,
    };
    let services = Services::from_config(&config, &DiscordCredentials::default(), &options)?;
    let ledger = BatchRunner::new(config, services, options)
        .ledger_for(novel)
        .await?;

    let json = serde_json::to_string_pretty(&ledger)
        .map_err(|e| JsonError::new(format!("Failed to serialize ledger: {}", e)))?;
    println!("{}", json);
    Ok(())
}
