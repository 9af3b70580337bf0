//! # Storage Layer
//!
//! This module defines the provider contract for blogstore. The
//! [`BlogProvider`] trait is what presentation-layer callers program against;
//! [`BlogStore`] implements it once for every backend.
//!
//! ## Engine and Backends
//!
//! The store is split in two:
//! 1. **Engine** ([`BlogStore`]): identity assignment, index maintenance,
//!    state rules, listing. Shared by all backends.
//! 2. **Backend** ([`backend::StorageBackend`]): raw persistence of the index
//!    and of individual items. Knows nothing about ids or states.
//!
//! ## Index Consistency
//!
//! The in-memory index is the source of truth for listing and for existence
//! checks. It lives behind a single `RwLock` owned by the store.
//!
//! Saves are **persist-then-commit**: the engine builds the updated index,
//! writes the item and that index through the backend, and only then swaps it
//! in. A failed write leaves memory exactly as it was. If the item write lands
//! and the index write fails, the item is rolled back: the previous copy is
//! written again, or a new item is removed. Saves hold the write lock for the whole sequence, which also
//! makes identity assignment race-free.
//!
//! ## Deletion Lifecycle
//!
//! - **Soft Delete**: `delete` sets the state to `Deleted` and saves. The
//!   header stays in the index and its item stays on disk.
//! - There is no undelete. Recreated content gets a fresh identity.
//!
//! ## Implementations
//!
//! - [`fs::FileBlogStore`]: index file plus one file per item.
//! - [`memory::VolatileBlogStore`]: process memory only, for tests and
//!   ephemeral deployments.
//!
//! ## Storage Layout
//!
//! ```text
//! <base_path>/<connection path>/
//! ├── index.json                # Headers, no bodies
//! └── blogsitems/
//!     └── {encoded-id}.json     # Header + body + attachments
//! ```

use crate::codec;
use crate::error::Result;
use crate::model::{Header, Item};
use crate::search::SearchRequest;

pub mod backend;
pub mod blog_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use blog_store::BlogStore;

/// Operations every blog content provider offers.
pub trait BlogProvider {
    /// Load or create the index. Must succeed before anything else is used.
    fn initialise(&self) -> Result<()>;

    /// Fetch the full item for a header reference (only the id is used).
    fn load(&self, header: &Header) -> Result<Item>;

    /// Create or update an item; returns it as stored, id assigned.
    fn save(&self, item: Item) -> Result<Item>;

    /// Headers matching the request, in the requested order.
    fn list(&self, request: &SearchRequest) -> Result<Vec<Header>>;

    /// Mark the referenced entry deleted.
    fn delete(&self, header: &Header) -> Result<()>;

    fn encode_id(&self, sequence: u64) -> String {
        codec::encode_id(sequence)
    }

    fn decode_id(&self, id: &str) -> Result<u64> {
        codec::decode_id(id)
    }
}
