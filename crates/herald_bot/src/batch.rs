//! Running every configured novel.

use crate::{
    ArcAnnouncer, BonusAnnouncer, HeraldConfig, MetricsSnapshot, NovelFailure, NovelOutcome,
    RunKind, RunMetrics, Services,
};
use herald_core::ArcLedger;
use herald_error::HeraldResult;
use tracing::{error, info, instrument};

/// Which trackers a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Arc tracker only
    Arcs,
    /// Bonus counter only
    Extras,
    /// Arc tracker, then bonus counter, per novel
    All,
}

impl RunMode {
    fn kinds(self) -> &'static [RunKind] {
        match self {
            Self::Arcs => &[RunKind::Arcs],
            Self::Extras => &[RunKind::Extras],
            Self::All => &[RunKind::Arcs, RunKind::Extras],
        }
    }
}

/// Options shared by every novel in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Only the novel with this title
    pub novel: Option<String>,
    /// Compute and preview, never write, commit or send
    pub dry_run: bool,
    /// Publish written ledgers through git (when enabled in config)
    pub commit: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            novel: None,
            dry_run: false,
            commit: true,
        }
    }
}

/// Result of a batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Successful novel runs
    pub outcomes: Vec<NovelOutcome>,
    /// Failed novel runs
    pub failures: Vec<NovelFailure>,
    /// Titles skipped for missing configuration
    pub skipped: Vec<String>,
    /// Counters at the end of the batch
    pub metrics: MetricsSnapshot,
}

impl BatchReport {
    /// Whether every novel run succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the trackers over the configured novels, one novel at a time.
///
/// A failing novel is logged and reported; the batch moves on.
pub struct BatchRunner {
    config: HeraldConfig,
    services: Services,
    options: RunOptions,
    metrics: RunMetrics,
}

impl BatchRunner {
    /// Creates a runner.
    pub fn new(config: HeraldConfig, services: Services, options: RunOptions) -> Self {
        Self {
            config,
            services,
            options,
            metrics: RunMetrics::new(),
        }
    }

    /// Shared metrics handle.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Runs `mode` over the selected novels.
    ///
    /// # Errors
    ///
    /// Only a novel filter that matches nothing fails the batch as a whole;
    /// per-novel failures are collected in the report.
    #[instrument(skip(self), fields(dry_run = self.options.dry_run))]
    pub async fn run(&self, mode: RunMode) -> HeraldResult<BatchReport> {
        let novels = self.config.select_novels(self.options.novel.as_deref())?;
        let arcs = ArcAnnouncer::new(
            &self.config,
            &self.services,
            &self.metrics,
            self.options.dry_run,
        );
        let extras = BonusAnnouncer::new(
            &self.config,
            &self.services,
            &self.metrics,
            self.options.dry_run,
        );

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        let mut skipped = Vec::new();

        for novel in novels {
            if !novel.is_runnable() {
                self.metrics.record_skip();
                skipped.push(novel.title.clone());
                continue;
            }

            for &kind in mode.kinds() {
                self.metrics.record_novel();
                let result = match kind {
                    RunKind::Arcs => arcs.run(novel).await,
                    RunKind::Extras => extras.run(novel).await,
                };
                match result {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        error!(novel = %novel.title, %kind, error = %e, transient = e.is_transient(), "Novel run failed");
                        self.metrics.record_failure(&novel.title);
                        failures.push(NovelFailure {
                            novel: novel.title.clone(),
                            kind,
                            error: e.to_string(),
                            transient: e.is_transient(),
                        });
                    }
                }
            }
        }

        let metrics = self.metrics.snapshot();
        info!(
            processed = metrics.novels_processed,
            skipped = metrics.novels_skipped,
            failed = metrics.novels_failed,
            announced = metrics.announcements_sent,
            ledgers_written = metrics.ledgers_written,
            elapsed_ms = metrics.elapsed_ms,
            "Batch finished"
        );

        Ok(BatchReport {
            outcomes,
            failures,
            skipped,
            metrics,
        })
    }

    /// Loads the stored ledger of the novel titled `title`.
    ///
    /// # Errors
    ///
    /// Returns a config error for an unknown title or missing ledger key,
    /// or the store's error.
    pub async fn ledger_for(&self, title: &str) -> HeraldResult<ArcLedger> {
        let novels = self.config.select_novels(Some(title))?;
        let mut ledger = ArcLedger::default();
        for novel in novels {
            let key = crate::arcs::ledger_key(novel)?;
            ledger = self.services.store.load(key).await?;
        }
        Ok(ledger)
    }
}
