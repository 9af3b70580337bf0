//! # blogstore
//!
//! A content store for blogs: entries (metadata, body, attachments), an
//! ordered index of their headers, and load/save/list/delete operations for
//! whatever sits on top (a web app, a CLI, a static site generator).
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Callers (controllers, templates, the blogz CLI)            │
//! │  - Program against the BlogProvider trait                   │
//! │  - Translate BlogError into user-facing responses           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (store/blog_store.rs)                               │
//! │  - Identity assignment, index maintenance, state rules      │
//! │  - Listing via SearchRequest (search.rs)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backends (store/*_backend.rs)                              │
//! │  - MemBackend (volatile), FsBackend (index + item files)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identities
//!
//! Entries are numbered internally by a `u64` sequence, but only the encoded
//! form ever leaves the store. See [`codec`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! The library never prints and never installs a tracing subscriber. It logs
//! through `tracing` and returns [`error::BlogError`] for everything else.
//!
//! ## Example
//!
//! ```
//! use blogstore::model::{Header, Item};
//! use blogstore::search::SearchRequest;
//! use blogstore::store::memory::VolatileBlogStore;
//! use blogstore::store::BlogProvider;
//!
//! let store = VolatileBlogStore::new();
//! store.initialise().unwrap();
//!
//! let saved = store
//!     .save(Item::new(Header::new("Hello", "ann"), "First post"))
//!     .unwrap();
//! let listed = store.list(&SearchRequest::new()).unwrap();
//! assert_eq!(listed[0].id, saved.header.id);
//! ```
//!
//! ## Module Overview
//!
//! - [`model`]: `Header`, `Item`, `Attachment`, `Index`
//! - [`codec`]: sequence number <-> external id
//! - [`search`]: `SearchRequest` filters, ordering, paging
//! - [`store`]: `BlogProvider` contract, engine, backends
//! - [`config`]: layered configuration and connection strings
//! - [`error`]: `BlogError`, `StorageError`

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
