//! In-process ledger store.

use crate::LedgerStore;
use herald_core::ArcLedger;
use herald_error::HeraldResult;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Ledgers held in memory, for previews and tests.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    records: Arc<Mutex<HashMap<String, ArcLedger>>>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one ledger.
    pub fn with_ledger(key: impl Into<String>, ledger: ArcLedger) -> Self {
        let store = Self::default();
        store.insert(key, ledger);
        store
    }

    /// Puts a ledger in place without going through [`LedgerStore::save`].
    pub fn insert(&self, key: impl Into<String>, ledger: ArcLedger) {
        self.lock().insert(key.into(), ledger);
    }

    /// Current ledger for `key`, if one was saved.
    pub fn get(&self, key: &str) -> Option<ArcLedger> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ArcLedger>> {
        // A poisoned map still holds whole records; keep serving them.
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load(&self, key: &str) -> HeraldResult<ArcLedger> {
        Ok(self.get(key).unwrap_or_default())
    }

    async fn save(&self, key: &str, ledger: &ArcLedger) -> HeraldResult<()> {
        self.insert(key, ledger.clone());
        Ok(())
    }

    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}
