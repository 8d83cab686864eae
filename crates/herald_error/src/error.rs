//! Top-level error wrapper types.

use crate::{
    CommitError, ConfigError, DiscordError, FeedError, HttpError, JsonError, StorageError,
};

/// Every failure a herald run can report.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: HeraldError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeraldErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Ledger storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Feed retrieval or parsing error
    #[from(FeedError)]
    Feed(FeedError),
    /// Version-control commit error
    #[from(CommitError)]
    Commit(CommitError),
    /// Notification sink error
    #[from(DiscordError)]
    Discord(DiscordError),
}

/// Herald error with kind discrimination.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldResult, ConfigError};
///
/// fn might_fail() -> HeraldResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herald Error: {}", _0)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }

    /// Whether the next scheduled run may succeed without operator action.
    ///
    /// Network-side failures are transient: the ledger was not advanced, so
    /// the same work is recomputed on the next invocation. An [`HttpError`]
    /// means the client itself could not be set up and is fatal.
    pub fn is_transient(&self) -> bool {
        match self.kind() {
            HeraldErrorKind::Feed(e) => matches!(e.kind, crate::FeedErrorKind::Unreachable(_)),
            HeraldErrorKind::Discord(e) => matches!(
                e.kind,
                crate::DiscordErrorKind::RequestFailed(_)
                    | crate::DiscordErrorKind::RateLimited(_)
                    | crate::DiscordErrorKind::Rejected { status: 500..=599, .. }
            ),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to HeraldErrorKind
impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for herald operations.
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiscordErrorKind, FeedErrorKind, StorageErrorKind};

    #[test]
    fn network_failures_are_transient() {
        let err: HeraldError =
            FeedError::new(FeedErrorKind::Unreachable("timeout".to_string())).into();
        assert!(err.is_transient());

        let err: HeraldError = DiscordError::new(DiscordErrorKind::Rejected {
            status: 502,
            body: "bad gateway".to_string(),
        })
        .into();
        assert!(err.is_transient());
    }

    #[test]
    fn persistence_and_config_failures_are_fatal() {
        let err: HeraldError =
            StorageError::new(StorageErrorKind::FileWrite("disk full".to_string())).into();
        assert!(!err.is_transient());

        let err: HeraldError = DiscordError::new(DiscordErrorKind::Rejected {
            status: 400,
            body: "Invalid Form Body".to_string(),
        })
        .into();
        assert!(!err.is_transient());

        let err: HeraldError = ConfigError::new("no novels").into();
        assert!(!err.is_transient());
    }

    #[test]
    fn client_setup_failure_is_fatal() {
        let err: HeraldError = HttpError::new("TLS backend unavailable").into();
        assert!(!err.is_transient());
    }

    #[test]
    fn error_records_creation_site() {
        let err = HttpError::new("boom");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.line > 0);
    }
}
