use std::path::PathBuf;
use thiserror::Error;

/// Store-level errors returned by every [`crate::store::BlogProvider`] operation.
#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Blog store is not initialised")]
    NotInitialised,

    #[error("Blog item not found: {0}")]
    ItemNotFound(String),

    #[error("Blog item {0} is deleted and cannot be changed")]
    ItemDeleted(String),

    #[error("Could not load blog data: {0}")]
    CouldNotLoad(#[source] StorageError),

    #[error("Could not save blog data: {0}")]
    CouldNotSave(#[source] StorageError),

    #[error("Invalid blog id: {0:?}")]
    InvalidId(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Blog index lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Raw persistence failures raised by a [`crate::store::backend::StorageBackend`].
///
/// The engine never hands these to callers directly; they travel as the
/// source of [`BlogError::CouldNotLoad`] or [`BlogError::CouldNotSave`].
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure is a plain "file does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
