//! JSON output failures.

/// Serializing a ledger or run metrics for the CLI failed.
///
/// Ledger files themselves report decode problems as
/// [`StorageErrorKind::Corrupt`](crate::StorageErrorKind::Corrupt).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// What went wrong
    pub message: String,
    /// Line of the call site
    pub line: u32,
    /// File of the call site
    pub file: &'static str,
}

impl JsonError {
    /// Records `message` at the caller's location.
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
