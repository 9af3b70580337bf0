use super::backend::StorageBackend;
use super::BlogProvider;
use crate::codec;
use crate::error::{BlogError, Result, StorageError};
use crate::model::{Header, HeaderState, Index, Item};
use crate::search::SearchRequest;
use chrono::{DateTime, Duration, Utc};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// The shared provider engine. Owns the index; delegates bytes to `B`.
pub struct BlogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    index: RwLock<Index>,
}

impl<B: StorageBackend> BlogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            index: RwLock::new(Index::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_initialised(&self) -> bool {
        self.index.read().map(|index| index.initialised).unwrap_or(false)
    }

    /// Number of headers in the index, deleted ones included.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_index()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read_index(&self) -> Result<RwLockReadGuard<'_, Index>> {
        let index = self
            .index
            .read()
            .map_err(|e| BlogError::LockPoisoned(e.to_string()))?;
        if !index.initialised {
            return Err(BlogError::NotInitialised);
        }
        Ok(index)
    }

    fn write_index(&self) -> Result<RwLockWriteGuard<'_, Index>> {
        let index = self
            .index
            .write()
            .map_err(|e| BlogError::LockPoisoned(e.to_string()))?;
        if !index.initialised {
            return Err(BlogError::NotInitialised);
        }
        Ok(index)
    }

    /// Persist `item`, then commit its header to `index`.
    ///
    /// Nothing in `index` changes unless both backend writes succeed. When the
    /// item write lands but the index write fails, the item is rolled back.
    fn save_locked(&self, index: &mut Index, mut item: Item) -> Result<Item> {
        let (id, previous, undo) = match item.header.id_str() {
            None => (
                codec::encode_id(codec::next_sequence(index.ids())?),
                None,
                Undo::Remove,
            ),
            Some(id) => {
                let existing = index
                    .get(id)
                    .ok_or_else(|| BlogError::ItemNotFound(id.to_string()))?;
                if existing.is_deleted() && !item.header.is_deleted() {
                    return Err(BlogError::ItemDeleted(id.to_string()));
                }
                let undo = match self.backend.load_item(id) {
                    Ok(stored) => Undo::Restore(Box::new(stored)),
                    Err(e) => {
                        warn!(id, error = %e, "stored item unreadable, saving without rollback copy");
                        Undo::Keep
                    }
                };
                (id.to_string(), Some(existing.updated_date), undo)
            }
        };

        item.header.id = Some(id.clone());
        item.header.updated_date = next_updated_date(previous);

        let mut updated = index.clone();
        updated.upsert(item.header.clone());

        self.backend
            .save_item(&id, &item)
            .map_err(BlogError::CouldNotSave)?;
        if let Err(e) = self.backend.save_index(&updated) {
            self.roll_back(&id, undo);
            return Err(BlogError::CouldNotSave(e));
        }

        *index = updated;
        debug!(id = %id, created = previous.is_none(), "saved blog item");
        Ok(item)
    }

    fn roll_back(&self, id: &str, undo: Undo) {
        let result = match undo {
            Undo::Restore(stored) => self.backend.save_item(id, &stored),
            Undo::Remove => self.backend.delete_item(id),
            Undo::Keep => Ok(()),
        };
        if let Err(e) = result {
            warn!(id, error = %e, "could not roll back item after failed index write");
        }
    }
}

/// What to do with an item file when the index write after it fails.
enum Undo {
    /// Put the previously stored item back.
    Restore(Box<Item>),
    /// The item is new; remove it.
    Remove,
    /// The previous item could not be read; leave the new one.
    Keep,
}

/// Now, or just past `previous` when the clock has not moved beyond it.
fn next_updated_date(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}

fn reference_id(header: &Header) -> Result<&str> {
    header
        .id_str()
        .ok_or_else(|| BlogError::InvalidId(String::new()))
}

impl<B: StorageBackend> BlogProvider for BlogStore<B> {
    fn initialise(&self) -> Result<()> {
        let mut index = self
            .index
            .write()
            .map_err(|e| BlogError::LockPoisoned(e.to_string()))?;

        let mut loaded = match self.backend.load_index().map_err(BlogError::CouldNotLoad)? {
            Some(found) => {
                if let Some(pos) = found.headers.iter().position(|h| !h.is_persisted()) {
                    return Err(BlogError::CouldNotLoad(StorageError::Backend(format!(
                        "index entry {} has no id",
                        pos
                    ))));
                }
                Index::from_headers(found.headers)
            }
            None => {
                info!(location = %self.backend.describe(), "no blog index found, creating a blank one");
                let blank = Index::new();
                self.backend
                    .save_index(&blank)
                    .map_err(BlogError::CouldNotSave)?;
                blank
            }
        };

        loaded.initialised = true;
        debug!(headers = loaded.len(), "blog index loaded");
        *index = loaded;
        Ok(())
    }

    fn load(&self, header: &Header) -> Result<Item> {
        let id = reference_id(header)?;
        let index = self.read_index()?;
        let indexed = index
            .get(id)
            .ok_or_else(|| BlogError::ItemNotFound(id.to_string()))?;

        let mut item = self.backend.load_item(id).map_err(BlogError::CouldNotLoad)?;
        item.header = indexed.clone();
        Ok(item)
    }

    fn save(&self, item: Item) -> Result<Item> {
        let mut index = self.write_index()?;
        self.save_locked(&mut index, item)
    }

    fn list(&self, request: &SearchRequest) -> Result<Vec<Header>> {
        let index = self.read_index()?;
        Ok(request.apply(&index.headers))
    }

    fn delete(&self, header: &Header) -> Result<()> {
        let id = reference_id(header)?;
        let mut index = self.write_index()?;
        let existing = index
            .get(id)
            .ok_or_else(|| BlogError::ItemNotFound(id.to_string()))?
            .clone();

        if existing.is_deleted() {
            debug!(id, "blog item already deleted");
            return Ok(());
        }

        let mut item = self.backend.load_item(id).map_err(BlogError::CouldNotLoad)?;
        item.header = existing;
        item.header.state = HeaderState::Deleted;
        self.save_locked(&mut index, item)?;
        Ok(())
    }
}
