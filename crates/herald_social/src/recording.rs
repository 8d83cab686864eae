//! In-memory sink.

use crate::{DiscordMessage, NotificationSink};
use herald_error::{DiscordError, DiscordErrorKind, HeraldResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    attempts: usize,
    sent: Vec<DiscordMessage>,
    fail_at: HashSet<usize>,
}

/// Keeps every delivered message instead of posting it.
///
/// Used for dry runs and in tests. Selected sends can be made to fail with
/// [`RecordingSink::failing_at`]; attempt indices count from 0 and include
/// failed attempts. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingSink {
    /// A sink that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects the given attempt indices with a server error.
    pub fn failing_at(attempts: impl IntoIterator<Item = usize>) -> Self {
        let sink = Self::default();
        sink.lock().fail_at = attempts.into_iter().collect();
        sink
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<DiscordMessage> {
        self.lock().sent.clone()
    }

    /// Number of send attempts, successful or not.
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, message: &DiscordMessage) -> HeraldResult<()> {
        let mut inner = self.lock();
        let attempt = inner.attempts;
        inner.attempts += 1;

        if inner.fail_at.contains(&attempt) {
            return Err(DiscordError::new(DiscordErrorKind::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            })
            .into());
        }

        tracing::debug!(attempt, preview = %message.preview(), "Recorded message");
        inner.sent.push(message.clone());
        Ok(())
    }
}
