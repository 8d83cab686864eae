//! Outbound HTTP setup failures.

/// A `reqwest` client could not be built (TLS backend, proxy settings).
///
/// Raised before any request leaves the process, so retrying on the next
/// run does not help; see [`HeraldError::is_transient`](crate::HeraldError::is_transient).
/// Failed requests are reported by the feed and Discord errors instead.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// What went wrong
    pub message: String,
    /// Line of the call site
    pub line: u32,
    /// File of the call site
    pub file: &'static str,
}

impl HttpError {
    /// Records `message` at the caller's location.
    ///
    /// ```
    /// use herald_error::HttpError;
    ///
    /// let err = HttpError::new("Failed to build HTTP client: no TLS backend");
    /// assert!(err.to_string().starts_with("HTTP Error: Failed to build"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
