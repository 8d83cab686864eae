//! Version-control commit error types.

/// Kinds of commit errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CommitErrorKind {
    /// The git executable could not be spawned
    #[display("Failed to run git: {}", _0)]
    Spawn(String),
    /// The ledger file or repository directory could not be resolved
    #[display("Cannot resolve path for git: {}", _0)]
    PathResolution(String),
    /// A git subcommand exited unsuccessfully
    #[display("git {} failed: {}", command, stderr)]
    CommandFailed {
        /// Subcommand that failed (e.g. "push")
        command: String,
        /// Captured standard error
        stderr: String,
    },
}

/// Commit error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Commit Error: {} at line {} in {}", kind, line, file)]
pub struct CommitError {
    /// The kind of error that occurred
    pub kind: CommitErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CommitError {
    /// Create a new commit error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CommitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
