//! Posting through a channel webhook.

use crate::{DiscordMessage, NotificationSink, check_response, request_failed};
use herald_error::{HeraldResult, HttpError};
use std::time::Duration;
use tracing::instrument;

/// Sends messages to a Discord webhook URL.
#[derive(Clone)]
pub struct DiscordWebhookSink {
    client: reqwest::Client,
    url: String,
}

impl std::fmt::Debug for DiscordWebhookSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The webhook URL embeds its secret.
        f.debug_struct("DiscordWebhookSink").finish_non_exhaustive()
    }
}

impl DiscordWebhookSink {
    /// Creates a sink posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the client cannot be constructed.
    pub fn new(url: impl Into<String>, timeout: Duration) -> HeraldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl NotificationSink for DiscordWebhookSink {
    #[instrument(skip_all)]
    async fn send(&self, message: &DiscordMessage) -> HeraldResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(request_failed)?;
        check_response(response).await?;
        Ok(())
    }
}
