//! Batch history persistence
//!
//! The whole list is stored as one JSON array under a single key, newest
//! entry first.

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::config::HistoryConfig;
use crate::errors::StorageResult;
use crate::types::HistoryEntry;

pub struct HistoryStore<K: KeyValueStore> {
    store: K,
    key: String,
    max_entries: usize,
}

impl<K: KeyValueStore> HistoryStore<K> {
    pub fn new(store: K, config: &HistoryConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            max_entries: config.max_entries.max(1),
        }
    }

    /// Load the persisted list
    ///
    /// A corrupt or unreadable value yields an empty history rather than an
    /// error, so a bad write never locks the user out of new runs.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read history from store: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(self.max_entries);
                debug!("Loaded {} history entries", entries.len());
                entries
            }
            Err(e) => {
                warn!("Ignoring unreadable history under {}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Persist the full list
    pub fn save(&self, entries: &[HistoryEntry]) -> StorageResult<()> {
        let encoded = serde_json::to_string(entries)?;
        self.store.set(&self.key, &encoded)
    }

    /// Remove the persisted list entirely
    pub fn clear(&self) -> StorageResult<()> {
        self.store.delete(&self.key)
    }

    /// Prepend `entry` to `entries`, keeping at most `max_entries`
    pub fn push_front(&self, entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
        entries.insert(0, entry);
        entries.truncate(self.max_entries);
    }

    pub fn inner(&self) -> &K {
        &self.store
    }
}
