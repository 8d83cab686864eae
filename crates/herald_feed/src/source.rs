//! Feed retrieval.

use crate::parse_feed;
use herald_core::Feed;
use herald_error::{FeedError, FeedErrorKind, HeraldResult, HttpError};
use std::time::Duration;
use tracing::{debug, instrument};

/// Something that can produce a [`Feed`] from a location string.
///
/// The production implementation is [`HttpFeedSource`]; orchestrator tests
/// substitute scripted sources.
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches and parses the feed at `location`.
    ///
    /// # Errors
    ///
    /// Returns a feed error when the location is unreachable or the document
    /// is malformed.
    async fn fetch(&self, location: &str) -> HeraldResult<Feed>;
}

/// Fetches feeds over HTTP(S) with a bounded timeout, or from local files.
///
/// Locations starting with `http://` or `https://` are requested; anything
/// else is read as a filesystem path (useful for replaying saved feeds).
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    /// User agent sent with feed requests.
    pub const USER_AGENT: &'static str = concat!("herald/", env!("CARGO_PKG_VERSION"));

    /// Creates a source whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the client cannot be constructed.
    pub fn new(timeout: Duration) -> HeraldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn download(&self, url: &str) -> Result<String, FeedError> {
        let unreachable = |e: reqwest::Error| {
            tracing::warn!(url, error = %e, "Feed request failed");
            FeedError::new(FeedErrorKind::Unreachable(format!("{}: {}", url, e)))
        };

        let response = self.client.get(url).send().await.map_err(unreachable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::new(FeedErrorKind::Unreachable(format!(
                "{}: HTTP {}",
                url, status
            ))));
        }
        response.text().await.map_err(unreachable)
    }
}

#[async_trait::async_trait]
impl FeedSource for HttpFeedSource {
    #[instrument(skip(self))]
    async fn fetch(&self, location: &str) -> HeraldResult<Feed> {
        let xml = if location.starts_with("http://") || location.starts_with("https://") {
            self.download(location).await?
        } else {
            tokio::fs::read_to_string(location).await.map_err(|e| {
                FeedError::new(FeedErrorKind::FileRead(format!("{}: {}", location, e)))
            })?
        };

        let feed = parse_feed(&xml)?;
        debug!(entries = feed.entries().len(), "Fetched feed");
        Ok(feed)
    }
}
