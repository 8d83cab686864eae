//! Counters for one batch run.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector for a batch run.
///
/// Clones share counters.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    inner: Arc<RunMetricsInner>,
}

#[derive(Debug)]
struct RunMetricsInner {
    novels_processed: AtomicU64,
    novels_skipped: AtomicU64,
    novels_failed: AtomicU64,
    announcements_sent: AtomicU64,
    message_failures: AtomicU64,
    ledgers_written: AtomicU64,
    started: Instant,
    last_failure: parking_lot::Mutex<Option<String>>,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunMetrics {
    /// Creates a new collector; elapsed time counts from here.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RunMetricsInner {
                novels_processed: AtomicU64::new(0),
                novels_skipped: AtomicU64::new(0),
                novels_failed: AtomicU64::new(0),
                announcements_sent: AtomicU64::new(0),
                message_failures: AtomicU64::new(0),
                ledgers_written: AtomicU64::new(0),
                started: Instant::now(),
                last_failure: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Records a novel run (arc or bonus) starting.
    pub fn record_novel(&self) {
        self.inner.novels_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a novel skipped for missing configuration.
    pub fn record_skip(&self) {
        self.inner.novels_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed novel run.
    pub fn record_failure(&self, novel: &str) {
        self.inner.novels_failed.fetch_add(1, Ordering::Relaxed);
        *self.inner.last_failure.lock() = Some(novel.to_string());
    }

    /// Records an announcement whose lead message was accepted.
    pub fn record_announcement(&self) {
        self.inner.announcements_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rejected message.
    pub fn record_message_failure(&self) {
        self.inner.message_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a ledger write.
    pub fn record_ledger_write(&self) {
        self.inner.ledgers_written.fetch_add(1, Ordering::Relaxed);
    }

    /// Novel runs started.
    pub fn novels_processed(&self) -> u64 {
        self.inner.novels_processed.load(Ordering::Relaxed)
    }

    /// Novels skipped.
    pub fn novels_skipped(&self) -> u64 {
        self.inner.novels_skipped.load(Ordering::Relaxed)
    }

    /// Novel runs failed.
    pub fn novels_failed(&self) -> u64 {
        self.inner.novels_failed.load(Ordering::Relaxed)
    }

    /// Announcements sent.
    pub fn announcements_sent(&self) -> u64 {
        self.inner.announcements_sent.load(Ordering::Relaxed)
    }

    /// Messages rejected.
    pub fn message_failures(&self) -> u64 {
        self.inner.message_failures.load(Ordering::Relaxed)
    }

    /// Ledger writes.
    pub fn ledgers_written(&self) -> u64 {
        self.inner.ledgers_written.load(Ordering::Relaxed)
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            novels_processed: self.novels_processed(),
            novels_skipped: self.novels_skipped(),
            novels_failed: self.novels_failed(),
            announcements_sent: self.announcements_sent(),
            message_failures: self.message_failures(),
            ledgers_written: self.ledgers_written(),
            elapsed_ms: self.inner.started.elapsed().as_millis() as u64,
            last_failure: self.inner.last_failure.lock().clone(),
        }
    }
}

/// Serializable snapshot of run metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Novel runs started
    pub novels_processed: u64,
    /// Novels skipped for missing configuration
    pub novels_skipped: u64,
    /// Novel runs that failed
    pub novels_failed: u64,
    /// Announcements whose lead message was accepted
    pub announcements_sent: u64,
    /// Messages rejected by the sink
    pub message_failures: u64,
    /// Ledger writes
    pub ledgers_written: u64,
    /// Wall time since the collector was created
    pub elapsed_ms: u64,
    /// Title of the most recent failed novel
    pub last_failure: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_counters() {
        let metrics = RunMetrics::new();
        let handle = metrics.clone();

        metrics.record_novel();
        metrics.record_failure("Broken Novel");
        handle.record_ledger_write();

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.novels_processed, 1);
        assert_eq!(snapshot.novels_failed, 1);
        assert_eq!(snapshot.ledgers_written, 1);
        assert_eq!(snapshot.last_failure.as_deref(), Some("Broken Novel"));
    }
}
