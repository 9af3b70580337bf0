use super::backend::{StorageBackend, StorageResult};
use crate::codec;
use crate::config::{BlogConfig, DEFAULT_EXTENSION, DEFAULT_ITEMS_FOLDER};
use crate::error::{Result, StorageError};
use crate::model::{Index, Item};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-per-item storage backend.
///
/// ```text
/// <root>/
/// ├── index.json                  # headers only
/// └── blogsitems/
///     └── <encoded-id>.json       # full item
/// ```
pub struct FsBackend {
    root: PathBuf,
    items_folder: String,
    extension: String,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            items_folder: DEFAULT_ITEMS_FOLDER.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Build a backend rooted at `base_path` joined with the connection `path`.
    pub fn from_config(config: &BlogConfig) -> Result<Self> {
        let connection = config.connection()?;
        Ok(Self::new(config.base_path.join(connection.path()))
            .with_items_folder(connection.items_folder())
            .with_extension(config.extension()))
    }

    pub fn with_items_folder(mut self, folder: &str) -> Self {
        self.items_folder = folder.to_string();
        self
    }

    pub fn with_extension(mut self, ext: &str) -> Self {
        self.extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(format!("index.{}", self.extension))
    }

    pub fn items_dir(&self) -> PathBuf {
        self.root.join(&self.items_folder)
    }

    /// Path of the file holding an item. Only well-formed ids map to a path,
    /// which keeps every item file inside the items folder.
    pub fn item_path(&self, id: &str) -> StorageResult<PathBuf> {
        if !codec::is_valid_id(id) {
            return Err(StorageError::Backend(format!(
                "refusing to build a path for malformed id {:?}",
                id
            )));
        }
        Ok(self.items_dir().join(format!("{}.{}", id, self.extension)))
    }

    fn ensure_dir(&self, path: &Path) -> StorageResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| StorageError::io(path, e))?;
        }
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> StorageResult<T> {
        let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write<T: Serialize>(&self, path: &Path, value: &T) -> StorageResult<()> {
        let dir = path.parent().unwrap_or(&self.root);
        self.ensure_dir(dir)?;

        let content = serde_json::to_string_pretty(value)?;

        // Atomic Write
        let tmp_path = dir.join(format!(".blog-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(|e| StorageError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::io(path, e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_index(&self) -> StorageResult<Option<Index>> {
        let path = self.index_path();
        match self.read::<Index>(&path) {
            Ok(index) => Ok(Some(index)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save_index(&self, index: &Index) -> StorageResult<()> {
        self.write(&self.index_path(), index)
    }

    fn load_item(&self, id: &str) -> StorageResult<Item> {
        self.read(&self.item_path(id)?)
    }

    fn save_item(&self, id: &str, item: &Item) -> StorageResult<()> {
        self.write(&self.item_path(id)?, item)
    }

    fn delete_item(&self, id: &str) -> StorageResult<()> {
        let path = self.item_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
