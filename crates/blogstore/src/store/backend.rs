use crate::error::StorageError;
use crate::model::{Index, Item};

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while BlogStore handles the "what" (identity, index rules, state).
///
/// Backends only move bytes. They never decide whether an entry exists or
/// which id it gets; that is the engine's job.
pub trait StorageBackend: Send + Sync {
    // --- Index Operations ---

    /// Load the persisted index.
    /// Returns Ok(None) if no index has been written yet (first run).
    /// Returns Err for everything else (unreadable, corrupt).
    fn load_index(&self) -> StorageResult<Option<Index>>;

    /// Persist the full index. Bodies are never part of it.
    fn save_index(&self, index: &Index) -> StorageResult<()>;

    // --- Item Operations ---

    /// Read a full item by its encoded id.
    /// A missing item is an error: the engine only asks for ids it has indexed.
    fn load_item(&self, id: &str) -> StorageResult<Item>;

    /// Write a full item (header, body, attachments) under its encoded id.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_item(&self, id: &str, item: &Item) -> StorageResult<()>;

    /// Remove an item. Removing an absent item is not an error.
    /// Only used to roll back a new item whose index write failed.
    fn delete_item(&self, id: &str) -> StorageResult<()>;

    /// Human readable location of the store, for diagnostics.
    fn describe(&self) -> String;
}
