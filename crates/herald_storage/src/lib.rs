//! Ledger persistence for herald.
//!
//! Each novel's [`ArcLedger`](herald_core::ArcLedger) is one record under a
//! string key. Writes replace the whole record atomically; a reader sees the
//! old ledger or the new one, never a mix. After a write the orchestrator may
//! ask a [`HistoryCommitter`] to record the change in version control.
//!
//! # Example
//!
//! ```rust
//! use herald_core::ArcLedger;
//! use herald_storage::{FileSystemLedgerStore, LedgerStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemLedgerStore::new("/tmp/herald-ledgers")?;
//!
//! let mut ledger = store.load("my-novel").await?;
//! ledger.locked.push("【Arc 1】Cannon Fodder".to_string());
//! store.save("my-novel", &ledger).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use herald_core::ArcLedger;
use herald_error::HeraldResult;
use std::path::PathBuf;

mod filesystem;
mod git;
mod memory;

pub use filesystem::FileSystemLedgerStore;
pub use git::{GitCommitter, GitCommitterBuilder, GitCommitterBuilderError, NoopCommitter};
pub use herald_error::{StorageError, StorageErrorKind};
pub use memory::MemoryLedgerStore;

/// Keyed store of per-novel ledgers.
#[async_trait::async_trait]
pub trait LedgerStore: Send + Sync {
    /// Loads the ledger stored under `key`.
    ///
    /// A key with no record yet yields an empty ledger.
    async fn load(&self, key: &str) -> HeraldResult<ArcLedger>;

    /// Replaces the ledger stored under `key` as a single atomic write.
    async fn save(&self, key: &str, ledger: &ArcLedger) -> HeraldResult<()>;

    /// Filesystem location of the record, if the backend has one.
    ///
    /// Used to hand the written file to a [`HistoryCommitter`].
    fn location(&self, key: &str) -> Option<PathBuf>;
}

/// Records a written ledger file in version-controlled history.
///
/// Failures are reported to the caller, which logs them; they never undo
/// the ledger write that preceded the commit.
#[async_trait::async_trait]
pub trait HistoryCommitter: Send + Sync {
    /// Commits and publishes `path` with a message naming `key`.
    ///
    /// Returns `Ok(false)` when the file had no staged changes.
    async fn commit(&self, key: &str, path: &std::path::Path) -> HeraldResult<bool>;
}
