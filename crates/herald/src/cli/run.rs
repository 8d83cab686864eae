//! Run command handler.

use super::commands::{Cli, RunArgs};
use herald_bot::{
    BatchReport, BatchRunner, DiscordCredentials, HeraldConfig, RunMode, RunOptions, Services,
};
use herald_error::{HeraldResult, JsonError};
use tracing::info;

/// Runs `mode` over the configured novels.
///
/// Returns whether every novel succeeded.
pub async fn run_batch(cli: &Cli, args: &RunArgs, mode: RunMode) -> HeraldResult<bool> {
    let config = HeraldConfig::load(cli.config.as_deref())?;
    let options = RunOptions {
        novel: args.novel.clone(),
        dry_run: args.dry_run,
        commit: !args.no_commit,
    };
    let services = Services::from_config(&config, &DiscordCredentials::from_env(), &options)?;

    info!(?mode, novels = config.novels.len(), "Starting run");
    let report = BatchRunner::new(config, services, options.clone())
        .run(mode)
        .await?;

    if options.dry_run {
        print_preview(&report);
    }

    let metrics = serde_json::to_string(&report.metrics)
        .map_err(|e| JsonError::new(format!("Failed to serialize metrics: {}", e)))?;
    info!(metrics = %metrics, "Run metrics");

    for failure in &report.failures {
        eprintln!(
            "{} ({}): {}{}",
            failure.novel,
            failure.kind,
            failure.error,
            if failure.transient { " [transient]" } else { "" }
        );
    }

    Ok(report.is_success())
}

fn print_preview(report: &BatchReport) {
    for outcome in &report.outcomes {
        println!("== {} ({}) ==", outcome.novel, outcome.kind);
        print!("{}", outcome.diff);
        match &outcome.announcement {
            Some(announcement) => println!("would announce: {}", announcement),
            None => println!("nothing to announce"),
        }
        for (i, message) in outcome.messages.iter().enumerate() {
            println!("--- message {} ---", i + 1);
            println!("{}", message.preview());
        }
        println!();
    }
    for title in &report.skipped {
        println!("== {} skipped ==", title);
    }
}
