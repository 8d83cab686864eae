//! The external collaborators a run talks to.

use crate::{DiscordCredentials, HeraldConfig, RunOptions};
use herald_error::{ConfigError, HeraldResult};
use herald_feed::{FeedSource, HttpFeedSource};
use herald_social::{DiscordChannelSink, DiscordWebhookSink, NotificationSink, RecordingSink};
use herald_storage::{
    FileSystemLedgerStore, GitCommitterBuilder, HistoryCommitter, LedgerStore, NoopCommitter,
};
use std::sync::Arc;
use tracing::info;

/// Feed source, ledger store, notification sink and history committer.
///
/// Orchestrators only see the traits; tests wire in-memory versions.
#[derive(Clone)]
pub struct Services {
    /// Feed retrieval
    pub feeds: Arc<dyn FeedSource>,
    /// Ledger persistence
    pub store: Arc<dyn LedgerStore>,
    /// Announcement delivery
    pub sink: Arc<dyn NotificationSink>,
    /// Publishing of written ledgers
    pub committer: Arc<dyn HistoryCommitter>,
}

impl Services {
    /// Wires production collaborators from configuration.
    ///
    /// Dry runs deliver to a [`RecordingSink`] and need no credentials.
    /// Otherwise a bot token with a channel id is preferred over a webhook.
    ///
    /// # Errors
    ///
    /// Returns a config error when no Discord credentials are available for
    /// a live run, or an adapter cannot be constructed.
    pub fn from_config(
        config: &HeraldConfig,
        credentials: &DiscordCredentials,
        options: &RunOptions,
    ) -> HeraldResult<Self> {
        let timeout = config.http.timeout();
        let feeds = Arc::new(HttpFeedSource::new(timeout)?);
        let store = Arc::new(FileSystemLedgerStore::new(&config.storage.ledger_dir)?);

        let channel_id = credentials
            .channel_id
            .clone()
            .or_else(|| config.discord.channel_id.clone());

        let sink: Arc<dyn NotificationSink> = if options.dry_run {
            info!("Dry run: announcements are previewed, not sent");
            Arc::new(RecordingSink::new())
        } else if let (Some(token), Some(channel_id)) = (&credentials.bot_token, channel_id) {
            info!(channel_id = %channel_id, "Posting as bot");
            Arc::new(DiscordChannelSink::new(
                token.clone(),
                channel_id,
                config.discord.api_base.clone(),
                timeout,
            )?)
        } else if let Some(url) = &credentials.webhook_url {
            info!("Posting through webhook");
            Arc::new(DiscordWebhookSink::new(url.clone(), timeout)?)
        } else {
            return Err(ConfigError::new(
                "No Discord credentials: set DISCORD_BOT_TOKEN and DISCORD_CHANNEL_ID, or DISCORD_WEBHOOK",
            )
            .into());
        };

        let committer: Arc<dyn HistoryCommitter> =
            if config.git.enabled && options.commit && !options.dry_run {
                Arc::new(
                    GitCommitterBuilder::default()
                        .repo_dir(config.storage.ledger_dir.clone())
                        .remote(config.git.remote.clone())
                        .branch(config.git.branch.clone())
                        .author_name(config.git.author_name.clone())
                        .author_email(config.git.author_email.clone())
                        .force_push_on_reject(config.git.force_push_on_reject)
                        .build()
                        .map_err(|e| ConfigError::new(format!("Invalid git settings: {}", e)))?,
                )
            } else {
                Arc::new(NoopCommitter)
            };

        Ok(Self {
            feeds,
            store,
            sink,
            committer,
        })
    }
}
