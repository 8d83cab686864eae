//! The arc announcement run for one novel.

use crate::format::{FormatContext, format_arc_announcement};
use crate::{HeraldConfig, NovelConfig, NovelOutcome, RunKind, RunMetrics, Services};
use herald_core::Feed;
use herald_error::{ConfigError, HeraldResult};
use herald_feed::nsfw_detected;
use herald_tracker::{LedgerDiff, classify, reconcile, record_announcement, should_announce};
use tracing::{debug, info, instrument, warn};

/// Runs the arc tracker for one novel.
///
/// Order of effects:
/// 1. fetch both streams and load the ledger
/// 2. classify and reconcile; persist when the ledger changed
/// 3. if the gate opens, send the header; on failure stop (the ledger keeps
///    the new arcs but not the announcement, so the next run retries)
/// 4. send the remaining parts, logging failures
/// 5. record the announcement and persist
#[derive(Clone, Copy)]
pub struct ArcAnnouncer<'a> {
    config: &'a HeraldConfig,
    services: &'a Services,
    metrics: &'a RunMetrics,
    dry_run: bool,
}

impl<'a> ArcAnnouncer<'a> {
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
    /// Feed, storage and header-send failures end the run for this novel.
    #[instrument(skip(self, novel), fields(novel = %novel.title))]
    pub async fn run(&self, novel: &NovelConfig) -> HeraldResult<NovelOutcome> {
        let key = ledger_key(novel)?;
        let (free, paid) = fetch_streams(self.services, novel).await?;
        let before = self.services.store.load(key).await?;

        let free_entries = free.chronological();
        let paid_entries = paid.chronological();
        let reconciliation = reconcile(
            &before,
            &classify(&free_entries),
            &classify(&paid_entries),
            self.config.style.label_style,
        );
        let mut ledger = reconciliation.ledger;
        let mut outcome = NovelOutcome::new(&novel.title, RunKind::Arcs);

        if ledger != before {
            outcome.ledger_written |=
                persist(self.services, self.metrics, key, &ledger, self.dry_run).await?;
        }

        let Some(candidate) = reconciliation
            .candidate
            .filter(|c| should_announce(&ledger, Some(c.as_str())))
        else {
            debug!("No new locked arc to announce");
            outcome.diff = LedgerDiff::between(&before, &ledger);
            return Ok(outcome);
        };

        let ctx = FormatContext {
            novel,
            discord: &self.config.discord,
            style: &self.config.style,
            nsfw: novel.nsfw
                || nsfw_detected(free.entries().iter().chain(paid.entries()), &novel.title),
        };
        let announcement = format_arc_announcement(&ctx, &ledger, &candidate);
        outcome.messages = announcement.messages();

        if let Err(e) = self.services.sink.send(&announcement.header).await {
            warn!(label = %candidate, error = %e, "Announcement header rejected; will retry next run");
            self.metrics.record_message_failure();
            return Err(e);
        }
        for part in announcement.rest() {
            if let Err(e) = self.services.sink.send(part).await {
                warn!(label = %candidate, error = %e, "Announcement part rejected");
                self.metrics.record_message_failure();
            }
        }

        info!(label = %candidate, "Announced new locked arc");
        self.metrics.record_announcement();
        record_announcement(&mut ledger, &candidate);
        outcome.ledger_written |=
            persist(self.services, self.metrics, key, &ledger, self.dry_run).await?;

        outcome.announcement = Some(candidate);
        outcome.diff = LedgerDiff::between(&before, &ledger);
        Ok(outcome)
    }
}

pub(crate) fn ledger_key(novel: &NovelConfig) -> HeraldResult<&str> {
    novel
        .ledger_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::new(format!("{}: no ledger_key configured", novel.title)).into())
}

/// Fetches the (public, advance) streams. The advance stream is required;
/// a novel without a public feed gets an empty one.
pub(crate) async fn fetch_streams(
    services: &Services,
    novel: &NovelConfig,
) -> HeraldResult<(Feed, Feed)> {
    let paid_location = novel
        .paid_feed
        .as_deref()
        .ok_or_else(|| ConfigError::new(format!("{}: no paid_feed configured", novel.title)))?;
    let paid = services.feeds.fetch(paid_location).await?;

    let free = match novel.free_feed.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(location) => services.feeds.fetch(location).await?,
        None => Feed::default(),
    };

    debug!(free = free.entries().len(), paid = paid.entries().len(), "Fetched streams");
    Ok((free, paid))
}

/// Writes the ledger and asks for a history commit. Commit failures are
/// logged and never undo the write.
pub(crate) async fn persist(
    services: &Services,
    metrics: &RunMetrics,
    key: &str,
    ledger: &herald_core::ArcLedger,
    dry_run: bool,
) -> HeraldResult<bool> {
    if dry_run {
        debug!(key, "Dry run: ledger not written");
        return Ok(false);
    }

    services.store.save(key, ledger).await?;
    metrics.record_ledger_write();

    if let Some(path) = services.store.location(key) {
        if let Err(e) = services.committer.commit(key, &path).await {
            warn!(key, error = %e, "History commit failed; ledger update kept");
        }
    }
    Ok(true)
}
