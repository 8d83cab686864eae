//! Discord-specific error types.
//!
//! Covers transport failures and rejected requests when posting
//! announcements through the Discord REST API or a webhook.

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// The request never completed (connection, TLS, timeout).
    #[display("Request failed: {_0}")]
    RequestFailed(String),

    /// Discord answered with a non-success status.
    #[display("Discord rejected the message ({status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body as returned by Discord
        body: String,
    },

    /// Discord asked us to slow down.
    #[display("Rate limited: {_0}")]
    RateLimited(String),

    /// Bot token is invalid or expired.
    #[display("Invalid or expired bot token")]
    InvalidToken,

    /// Channel does not exist or the bot cannot see it.
    #[display("Channel not found: {_0}")]
    ChannelNotFound(String),

    /// Message failed to serialize.
    #[display("Message send failed: {_0}")]
    MessageSendFailed(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    /// The kind of error that occurred
    pub kind: DiscordErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use herald_error::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InvalidToken);
    /// assert!(format!("{}", err).contains("Invalid or expired"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
