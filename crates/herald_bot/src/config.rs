//! Configuration and per-novel mapping.
//!
//! Layered with the `config` crate, lowest precedence first:
//! 1. Bundled defaults (`include_str!` of `herald.toml`)
//! 2. `~/.config/herald/herald.toml`
//! 3. `./herald.toml`
//! 4. An explicit file (`--config`)
//! 5. `HERALD__<SECTION>__<KEY>` environment variables
//!
//! Discord credentials come from the environment only (see
//! [`DiscordCredentials`]).

use herald_core::LabelStyle;
use herald_error::{ConfigError, HeraldError, HeraldResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_CONFIG: &str = include_str!("../herald.toml");

/// Full herald configuration.
///
/// An immutable value handed to the orchestrators and the formatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Discord destination and role mentions
    pub discord: DiscordConfig,
    /// Outbound HTTP settings
    pub http: HttpConfig,
    /// Ledger storage
    pub storage: StorageConfig,
    /// Version-control publishing of ledgers
    pub git: GitConfig,
    /// Announcement decorations and label style
    pub style: StyleConfig,
    /// Tracked novels
    pub novels: Vec<NovelConfig>,
}

impl HeraldConfig {
    /// Loads the layered configuration.
    ///
    /// `explicit` must exist when given; the home and working-directory
    /// files are optional.
    ///
    /// # Errors
    ///
    /// Returns a config error when a source cannot be read or the merged
    /// result does not match the schema.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> HeraldResult<Self> {
        debug!("Loading configuration: env > --config > ./herald.toml > home > bundled defaults");

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/herald/herald.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder.add_source(config::File::with_name("herald").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("HERALD")
                .prefix_separator("__")
                .separator("__"),
        );

        let config: Self = builder
            .build()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to load configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        debug!(novels = config.novels.len(), "Configuration loaded");
        Ok(config)
    }

    /// Parses a single TOML document on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a config error when the document is invalid.
    pub fn from_toml_str(text: &str) -> HeraldResult<Self> {
        let mut value: toml::Table = toml::from_str(DEFAULT_CONFIG).map_err(|e| {
            HeraldError::from(ConfigError::new(format!("Bundled defaults invalid: {}", e)))
        })?;
        let overrides: toml::Table = toml::from_str(text).map_err(|e| {
            HeraldError::from(ConfigError::new(format!("Failed to parse config: {}", e)))
        })?;
        merge(&mut value, overrides);

        toml::Value::Table(value).try_into().map_err(|e| {
            HeraldError::from(ConfigError::new(format!("Failed to parse config: {}", e)))
        })
    }

    /// Novels to process, narrowed to `filter` (case-insensitive title) when
    /// given.
    ///
    /// # Errors
    ///
    /// Returns a config error when a filter matches no configured novel.
    pub fn select_novels(&self, filter: Option<&str>) -> HeraldResult<Vec<&NovelConfig>> {
        let Some(filter) = filter else {
            return Ok(self.novels.iter().collect());
        };

        let selected: Vec<_> = self
            .novels
            .iter()
            .filter(|n| n.title.eq_ignore_ascii_case(filter.trim()))
            .collect();
        if selected.is_empty() {
            return Err(ConfigError::new(format!("No configured novel titled {:?}", filter)).into());
        }
        Ok(selected)
    }
}

fn merge(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge(existing, incoming);
                    continue;
                }
                base.insert(key, toml::Value::Table(incoming));
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Discord destination and shared role mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Channel to post to as the bot; `DISCORD_CHANNEL_ID` overrides
    pub channel_id: Option<String>,
    /// Role pinged on every announcement, e.g. `<@&123>`
    pub ongoing_role: String,
    /// Role added for flagged novels
    pub nsfw_role: String,
    /// REST API base
    pub api_base: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            channel_id: None,
            ongoing_role: String::new(),
            nsfw_role: String::new(),
            api_base: herald_social::DISCORD_API_BASE.to_string(),
        }
    }
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout for feeds and Discord
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// The timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Ledger storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON ledger per novel
    pub ledger_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            ledger_dir: PathBuf::from("."),
        }
    }
}

/// Version-control publishing of written ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Commit and push after each ledger write
    pub enabled: bool,
    /// Remote to push to
    pub remote: String,
    /// Branch to push
    pub branch: String,
    /// Commit author name override
    pub author_name: Option<String>,
    /// Commit author email override
    pub author_email: Option<String>,
    /// Retry a rejected push with `--force`
    pub force_push_on_reject: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            remote: "origin".to_string(),
            branch: "main".to_string(),
            author_name: None,
            author_email: None,
            force_push_on_reject: true,
        }
    }
}

/// Announcement decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// How newly recorded arcs are labelled
    pub label_style: LabelStyle,
    /// Headline line of an arc announcement
    pub arc_headline: String,
    /// Closing line of the header
    pub frame_top: String,
    /// Opening line of the footer
    pub frame_bottom: String,
    /// Text above the unlocked list
    pub unlocked_heading: String,
    /// Text above the locked list
    pub locked_heading: String,
    /// Prefix marking the newest locked arc
    pub newest_marker: String,
    /// Unlocked embed colour
    pub unlocked_color: u32,
    /// Locked embed colour
    pub locked_color: u32,
    /// Wraps the bonus headline on both sides
    pub bonus_decoration: String,
    /// Custom emoji for digits 0-9; plain digits when not exactly ten
    pub digit_emoji: Vec<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            label_style: LabelStyle::Bracketed,
            arc_headline: "## NEW ARC ALERT".to_string(),
            frame_top: "❀° ┄───────────────────────╮".to_string(),
            frame_bottom: "╰───────────────────────┄ °❀".to_string(),
            unlocked_heading: "`Unlocked 🔓`".to_string(),
            locked_heading: "`Locked 🔐`".to_string(),
            newest_marker: "➤ ".to_string(),
            unlocked_color: 0xFFF9BF,
            locked_color: 0xA87676,
            bonus_decoration: "･ﾟ✧".to_string(),
            digit_emoji: Vec::new(),
        }
    }
}

/// One tracked novel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NovelConfig {
    /// Display title; also matched against feed entry titles
    pub title: String,
    /// Hosting site name
    pub host: String,
    /// The novel's role mention, e.g. `<@&123>`
    pub role_mention: String,
    /// Public (free) stream location
    pub free_feed: Option<String>,
    /// Advance (paid) stream location
    pub paid_feed: Option<String>,
    /// Link to the novel page
    pub novel_url: String,
    /// Emoji to react with for the role
    pub custom_emoji: String,
    /// Link to the role-reaction message
    pub role_url: String,
    /// Ledger record key
    pub ledger_key: Option<String>,
    /// Chapter count description, e.g. `1184 chapters + 8 extras`
    pub chapter_count: String,
    /// Always add the NSFW role
    pub nsfw: bool,
}

impl NovelConfig {
    /// Why this novel cannot be processed, if it cannot.
    pub fn skip_reason(&self) -> Option<&'static str> {
        if self.ledger_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            Some("no ledger_key configured")
        } else if self.paid_feed.as_deref().is_none_or(|f| f.trim().is_empty()) {
            Some("no paid_feed configured")
        } else {
            None
        }
    }

    /// Logs and reports whether the novel is runnable.
    pub fn is_runnable(&self) -> bool {
        match self.skip_reason() {
            Some(reason) => {
                warn!(novel = %self.title, reason, "Skipping novel");
                false
            }
            None => true,
        }
    }
}

/// Discord credentials from the environment.
#[derive(Clone, Default)]
pub struct DiscordCredentials {
    /// `DISCORD_BOT_TOKEN`
    pub bot_token: Option<String>,
    /// `DISCORD_CHANNEL_ID`
    pub channel_id: Option<String>,
    /// `DISCORD_WEBHOOK`
    pub webhook_url: Option<String>,
}

impl std::fmt::Debug for DiscordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordCredentials")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "***"))
            .field("channel_id", &self.channel_id)
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "***"))
            .finish()
    }
}

impl DiscordCredentials {
    /// Reads the credential variables; empty values count as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            bot_token: var("DISCORD_BOT_TOKEN"),
            channel_id: var("DISCORD_CHANNEL_ID"),
            webhook_url: var("DISCORD_WEBHOOK"),
        }
    }
}
