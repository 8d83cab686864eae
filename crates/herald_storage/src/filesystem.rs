//! JSON ledger files on the local filesystem.

use crate::LedgerStore;
use herald_core::ArcLedger;
use herald_error::{HeraldResult, JsonError, StorageError, StorageErrorKind};
use std::path::{Component, Path, PathBuf};

/// Stores each ledger as a pretty-printed JSON file under a base directory.
///
/// The key is a relative path; `.json` is appended when it has no extension.
/// Keys may name subdirectories (`tracking/my-novel`) but may not escape the
/// base directory.
///
/// ```text
/// {base_path}/
/// ├── my-novel.json
/// └── tracking/
///     └── other-novel.json
/// ```
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a crash mid-write leaves the previous ledger intact. Non-ASCII labels
/// are written as-is.
#[derive(Debug, Clone)]
pub struct FileSystemLedgerStore {
    base_path: PathBuf,
}

impl FileSystemLedgerStore {
    /// Creates a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> HeraldResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %base_path.display(), "Opened ledger store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolves a key to its file path.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let valid = !key.trim().is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(
                key.to_string(),
            )));
        }

        let mut path = self.base_path.join(relative);
        if path.extension().is_none() {
            path.set_extension("json");
        }
        Ok(path)
    }
}

#[async_trait::async_trait]
impl LedgerStore for FileSystemLedgerStore {
    #[tracing::instrument(skip(self))]
    async fn load(&self, key: &str) -> HeraldResult<ArcLedger> {
        let path = self.path_for(key)?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No ledger yet, starting empty");
                return Ok(ArcLedger::default());
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        if text.trim().is_empty() {
            return Ok(ArcLedger::default());
        }

        let ledger = serde_json::from_str(&text).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(ledger)
    }

    #[tracing::instrument(skip(self, ledger))]
    async fn save(&self, key: &str, ledger: &ArcLedger) -> HeraldResult<()> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(ledger)
            .map_err(|e| JsonError::new(format!("Failed to serialize ledger: {}", e)))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), "Ledger saved");
        Ok(())
    }

    fn location(&self, key: &str) -> Option<PathBuf> {
        self.path_for(key).ok()
    }
}
