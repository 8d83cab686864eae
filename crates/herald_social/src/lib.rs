//! Notification sinks for herald.
//!
//! Announcements are posted to Discord either as the bot (REST API with a
//! bot token) or through a channel webhook. Both speak the same message
//! payload, [`DiscordMessage`]. [`RecordingSink`] keeps messages in memory
//! for previews and tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod models;
mod recording;
mod webhook;

pub use channel::{DISCORD_API_BASE, DiscordChannelSink};
pub use herald_error::{DiscordError, DiscordErrorKind};
pub use models::{AllowedMentions, DiscordMessage, Embed, EmbedBuilder, EmbedBuilderError};
pub use recording::RecordingSink;
pub use webhook::DiscordWebhookSink;

use herald_error::HeraldResult;

/// Destination for announcement messages.
///
/// A sink is bound to one destination when constructed; `send` delivers a
/// single message and reports whether Discord accepted it.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    /// Posts one message.
    async fn send(&self, message: &DiscordMessage) -> HeraldResult<()>;
}

/// Maps a Discord HTTP response onto herald's error kinds.
async fn check_response(response: reqwest::Response) -> Result<(), DiscordError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), body = %body, "Discord rejected message");

    let kind = match status.as_u16() {
        401 => DiscordErrorKind::InvalidToken,
        404 => DiscordErrorKind::ChannelNotFound(body),
        429 => DiscordErrorKind::RateLimited(body),
        code => DiscordErrorKind::Rejected { status: code, body },
    };
    Err(DiscordError::new(kind))
}

fn request_failed(e: reqwest::Error) -> DiscordError {
    tracing::error!(error = %e, "Discord request failed");
    DiscordError::new(DiscordErrorKind::RequestFailed(e.to_string()))
}
