use super::backend::{StorageBackend, StorageResult};
use crate::error::StorageError;
use crate::model::{Index, Item};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// Volatile storage backend.
///
/// Keeps the index and items in process memory behind `RwLock`s so a store
/// built on it can be shared across threads. Nothing outlives the process.
#[derive(Default)]
pub struct MemBackend {
    index: RwLock<Option<Index>>,
    items: RwLock<HashMap<String, Item>>,
    simulate_item_write_error: AtomicBool,
    simulate_index_write_error: AtomicBool,
    item_reads: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.set_simulate_item_write_error(simulate);
        self.set_simulate_index_write_error(simulate);
    }

    pub fn set_simulate_item_write_error(&self, simulate: bool) {
        self.simulate_item_write_error
            .store(simulate, Ordering::SeqCst);
    }

    pub fn set_simulate_index_write_error(&self, simulate: bool) {
        self.simulate_index_write_error
            .store(simulate, Ordering::SeqCst);
    }

    /// Number of `load_item` calls served so far.
    pub fn item_reads(&self) -> usize {
        self.item_reads.load(Ordering::SeqCst)
    }

    fn check_writable(&self, switch: &AtomicBool) -> StorageResult<()> {
        if switch.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("Simulated write error".to_string()));
        }
        Ok(())
    }
}

fn poisoned(e: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(format!("lock poisoned: {}", e))
}

impl StorageBackend for MemBackend {
    fn load_index(&self) -> StorageResult<Option<Index>> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index.clone())
    }

    fn save_index(&self, new_index: &Index) -> StorageResult<()> {
        self.check_writable(&self.simulate_index_write_error)?;
        let mut index = self.index.write().map_err(poisoned)?;
        *index = Some(new_index.clone());
        Ok(())
    }

    fn load_item(&self, id: &str) -> StorageResult<Item> {
        self.item_reads.fetch_add(1, Ordering::SeqCst);
        let items = self.items.read().map_err(poisoned)?;
        items
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::Backend(format!("no item stored under {}", id)))
    }

    fn save_item(&self, id: &str, item: &Item) -> StorageResult<()> {
        self.check_writable(&self.simulate_item_write_error)?;
        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(id.to_string(), item.clone());
        Ok(())
    }

    fn delete_item(&self, id: &str) -> StorageResult<()> {
        self.check_writable(&self.simulate_item_write_error)?;
        let mut items = self.items.write().map_err(poisoned)?;
        items.remove(id);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Header;

    #[test]
    fn test_no_index_before_first_save() {
        let backend = MemBackend::new();
        assert!(backend.load_index().unwrap().is_none());

        backend.save_index(&Index::new()).unwrap();
        assert_eq!(backend.load_index().unwrap(), Some(Index::new()));
    }

    #[test]
    fn test_item_io() {
        let backend = MemBackend::new();
        let item = Item::new(Header::new("Hello", "ann"), "body");

        backend.save_item("abc", &item).unwrap();
        assert_eq!(backend.load_item("abc").unwrap(), item);
        assert!(backend.load_item("missing").is_err());
        assert_eq!(backend.item_reads(), 2);
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);

        let item = Item::new(Header::new("Hello", "ann"), "body");
        assert!(backend.save_item("abc", &item).is_err());
        assert!(backend.save_index(&Index::new()).is_err());

        backend.set_simulate_write_error(false);
        assert!(backend.save_item("abc", &item).is_ok());
    }

    #[test]
    fn test_index_only_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_index_write_error(true);

        let item = Item::new(Header::new("Hello", "ann"), "body");
        assert!(backend.save_item("abc", &item).is_ok());
        assert!(backend.save_index(&Index::new()).is_err());

        backend.delete_item("abc").unwrap();
        assert!(backend.load_item("abc").is_err());
        // Deleting again is fine.
        backend.delete_item("abc").unwrap();
    }
}
