//! Durable key-value storage for client state.
//!
//! ## Architecture
//!
//! The `KeyValueStore` trait abstracts string-keyed persistence:
//! - `MemoryStore` - process-local map, used by tests and throwaway sessions
//! - `SqliteStore` - single-table SQLite database that survives restarts
//!
//! `HistoryStore` layers the batch history encoding on top of any store.

pub mod history;
pub mod memory;
pub mod sqlite;

pub use history::HistoryStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::errors::StorageResult;

/// String-keyed persistent storage
///
/// Writers are not coordinated: concurrent read-modify-write sequences from
/// different processes resolve as last writer wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key; removing a missing key is not an error
    fn delete(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        (**self).delete(key)
    }
}
