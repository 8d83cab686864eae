//! Configuration failures.

/// The layered configuration could not be loaded, or a novel entry lacks a
/// field a run needs (`ledger_key`, `paid_feed`), or no Discord credentials
/// are set for a live run.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is missing or invalid
    pub message: String,
    /// Line of the call site
    pub line: u32,
    /// File of the call site
    pub file: &'static str,
}

impl ConfigError {
    /// Records `message` at the caller's location.
    ///
    /// ```
    /// use herald_error::ConfigError;
    ///
    /// let err = ConfigError::new("Cannon Fodder: no ledger_key configured");
    /// assert!(err.to_string().contains("no ledger_key"));
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
