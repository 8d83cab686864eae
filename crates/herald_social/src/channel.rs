//! Posting as the bot through the Discord REST API.

use crate::{DiscordMessage, NotificationSink, check_response, request_failed};
use herald_error::{HeraldResult, HttpError};
use std::time::Duration;
use tracing::{debug, instrument};

/// Discord API base URL.
pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Sends messages to one channel using a bot token.
#[derive(Clone)]
pub struct DiscordChannelSink {
    client: reqwest::Client,
    token: String,
    channel_id: String,
    api_base: String,
}

impl std::fmt::Debug for DiscordChannelSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordChannelSink")
            .field("channel_id", &self.channel_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl DiscordChannelSink {
    /// Creates a sink for `channel_id`.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the client cannot be constructed.
    pub fn new(
        token: impl Into<String>,
        channel_id: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> HeraldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("herald/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.into(),
            channel_id: channel_id.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/channels/{}/messages", self.api_base, self.channel_id)
    }
}

#[async_trait::async_trait]
impl NotificationSink for DiscordChannelSink {
    #[instrument(skip(self, message), fields(channel_id = %self.channel_id))]
    async fn send(&self, message: &DiscordMessage) -> HeraldResult<()> {
        let url = self.url();
        debug!(url = %url, "Discord API POST");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(message)
            .send()
            .await
            .map_err(request_failed)?;

        check_response(response).await?;
        debug!("Message posted");
        Ok(())
    }
}
