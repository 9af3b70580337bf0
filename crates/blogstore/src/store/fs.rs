use super::blog_store::BlogStore;
use super::fs_backend::FsBackend;
use crate::config::BlogConfig;
use crate::error::Result;
use std::path::PathBuf;

/// Blog store persisted as an index file plus one file per item.
pub type FileBlogStore = BlogStore<FsBackend>;

impl BlogStore<FsBackend> {
    /// Store rooted at `root` with the default items folder and extension.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::with_backend(FsBackend::new(root))
    }

    pub fn from_config(config: &BlogConfig) -> Result<Self> {
        Ok(Self::with_backend(FsBackend::from_config(config)?))
    }
}
