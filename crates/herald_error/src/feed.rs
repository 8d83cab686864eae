//! Feed retrieval and parsing error types.

/// Kinds of feed errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FeedErrorKind {
    /// The feed could not be fetched (network, timeout, non-success status)
    #[display("Feed unreachable: {}", _0)]
    Unreachable(String),
    /// A local feed file could not be read
    #[display("Feed file unreadable: {}", _0)]
    FileRead(String),
    /// The feed document is not well-formed XML
    #[display("Malformed feed document: {}", _0)]
    Malformed(String),
}

/// Feed error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Feed Error: {} at line {} in {}", kind, line, file)]
pub struct FeedError {
    /// The kind of error that occurred
    pub kind: FeedErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FeedError {
    /// Create a new feed error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FeedErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
