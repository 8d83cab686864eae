//! The bonus-content announcement run for one novel.

use crate::arcs::{fetch_streams, ledger_key, persist};
use crate::format::{FormatContext, format_bonus_announcement};
use crate::{HeraldConfig, NovelConfig, NovelOutcome, RunKind, RunMetrics, Services};
use herald_error::HeraldResult;
use herald_feed::nsfw_detected;
use herald_tracker::{BonusObservation, BonusTotals, LedgerDiff, plan_bonus};
use tracing::{debug, info, instrument, warn};

/// Runs the bonus counter for one novel.
///
/// Scans both streams for the highest extra / side story index. When it
/// exceeds the ledger's counter, one message is sent and, only if it was
/// accepted, the counter is raised to the observed maximum and persisted.
#[derive(Clone, Copy)]
pub struct BonusAnnouncer<'a> {
    config: &'a HeraldConfig,
    services: &'a Services,
    metrics: &'a RunMetrics,
    dry_run: bool,
}

impl<'a> BonusAnnouncer<'a> {
    /// Creates an announcer. With `dry_run` the ledger is never written.
    pub fn new(
        config: &'a HeraldConfig,
        services: &'a Services,
        metrics: &'a RunMetrics,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            services,
            metrics,
            dry_run,
        }
    }

    /// Processes one novel.
    ///
    /// # Errors
    ///
    /// Feed, storage and send failures end the run for this novel; the
    /// counter is not advanced.
    #[instrument(skip(self, novel), fields(novel = %novel.title))]
    pub async fn run(&self, novel: &NovelConfig) -> HeraldResult<NovelOutcome> {
        let key = ledger_key(novel)?;
        let (free, paid) = fetch_streams(self.services, novel).await?;
        let before = self.services.store.load(key).await?;
        let mut outcome = NovelOutcome::new(&novel.title, RunKind::Extras);

        let observed = BonusObservation::observe(free.entries().iter().chain(paid.entries()));
        let totals = BonusTotals::parse(&novel.chapter_count);
        debug!(?observed, ?totals, counter = before.bonus_counter, "Observed bonus content");

        let Some(plan) = plan_bonus(before.bonus_counter, &observed, &totals) else {
            return Ok(outcome);
        };

        let ctx = FormatContext {
            novel,
            discord: &self.config.discord,
            style: &self.config.style,
            nsfw: novel.nsfw
                || nsfw_detected(free.entries().iter().chain(paid.entries()), &novel.title),
        };
        let message = format_bonus_announcement(&ctx, &plan);
        outcome.messages = vec![message.clone()];

        if let Err(e) = self.services.sink.send(&message).await {
            warn!(watermark = plan.watermark, error = %e, "Bonus announcement rejected; will retry next run");
            self.metrics.record_message_failure();
            return Err(e);
        }
        info!(watermark = plan.watermark, wording = ?plan.wording, "Announced bonus content");
        self.metrics.record_announcement();

        let mut ledger = before.clone();
        ledger.bonus_counter = plan.watermark;
        outcome.ledger_written =
            persist(self.services, self.metrics, key, &ledger, self.dry_run).await?;

        outcome.announcement = Some(format!("{} up to #{}", plan.headline, plan.watermark));
        outcome.diff = LedgerDiff::between(&before, &ledger);
        Ok(outcome)
    }
}
