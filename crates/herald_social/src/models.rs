//! Discord message payloads.

use serde::{Deserialize, Serialize};

/// Message flag that stops Discord from unfurling links into previews.
pub const SUPPRESS_EMBEDS: u64 = 1 << 2;

/// Which mentions in a message are allowed to ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AllowedMentions {
    /// Mention types that ping: `roles`, `users`, `everyone`
    parse: Vec<String>,
}

impl AllowedMentions {
    /// Only role mentions ping.
    pub fn roles_only() -> Self {
        Self {
            parse: vec!["roles".to_string()],
        }
    }
}

impl Default for AllowedMentions {
    fn default() -> Self {
        Self::roles_only()
    }
}

/// A rich embed attached to a message.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Embed {
    /// Markdown body
    description: String,
    /// Sidebar colour as `0xRRGGBB`
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<u32>,
}

/// Payload for creating a message, via bot or webhook.
///
/// Role mentions are the only ones allowed to ping.
///
/// ```
/// use herald_social::{DiscordMessage, EmbedBuilder};
///
/// let message = DiscordMessage::new("Hello")
///     .suppress_link_previews()
///     .with_embeds(vec![EmbedBuilder::default().description("body").build().unwrap()]);
/// let json = serde_json::to_value(&message).unwrap();
/// assert_eq!(json["flags"], 4);
/// assert_eq!(json["allowed_mentions"]["parse"][0], "roles");
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
pub struct DiscordMessage {
    /// Plain-text content
    #[serde(default, skip_serializing_if = "String::is_empty")]
    content: String,
    /// Embeds, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<Embed>,
    /// Message flags bitfield
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flags: Option<u64>,
    /// Mention policy
    #[serde(default)]
    allowed_mentions: AllowedMentions,
}

impl DiscordMessage {
    /// A text message.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// A message carrying only embeds.
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    /// Sets the flag that suppresses link previews.
    pub fn suppress_link_previews(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or(0) | SUPPRESS_EMBEDS);
        self
    }

    /// Text of the message and its embeds, for logs and previews.
    pub fn preview(&self) -> String {
        std::iter::once(self.content.as_str())
            .chain(self.embeds.iter().map(|e| e.description.as_str()))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
