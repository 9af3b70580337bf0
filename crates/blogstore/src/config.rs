//! # Configuration
//!
//! Blog store configuration is managed by [`confique`], which handles layered
//! loading from TOML files, environment variables and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `BLOGZ_BASE_PATH`, `BLOGZ_CONNECTION`, `BLOGZ_EXTENSION`.
//! 2. **Config files**: in the order given to [`BlogConfig::load`]; earlier files win.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base_path` | `.` | Directory the connection path is resolved against |
//! | `connection` | `path=blog;items=blogsitems` | Connection string, see [`ConnectionString`] |
//! | `extension` | `json` | Extension of the index and item files |

use crate::error::{BlogError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ITEMS_FOLDER: &str = "blogsitems";
pub const DEFAULT_EXTENSION: &str = "json";

/// Configuration for a file-backed store, stored in `blogz.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    /// Base directory; the connection `path` is relative to it.
    #[config(env = "BLOGZ_BASE_PATH", default = ".")]
    pub base_path: PathBuf,

    /// Connection string, e.g. "path=blog;items=blogsitems".
    #[config(env = "BLOGZ_CONNECTION", default = "path=blog;items=blogsitems")]
    pub connection: String,

    /// Extension for index and item files (with or without the leading dot).
    #[config(env = "BLOGZ_EXTENSION", default = "json")]
    pub extension: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            connection: "path=blog;items=blogsitems".to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from the environment and the given files.
    /// Missing files are skipped.
    pub fn load<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let mut builder = BlogConfig::builder().env();
        for file in files {
            builder = builder.file(file.as_ref());
        }
        builder.load().map_err(|e| BlogError::Config(e.to_string()))
    }

    pub fn connection(&self) -> Result<ConnectionString> {
        self.connection.parse()
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// Directory holding the index file.
    pub fn root(&self) -> Result<PathBuf> {
        Ok(self.base_path.join(self.connection()?.path()))
    }
}

/// `key=value` pairs separated by `;`.
///
/// Keys are case-insensitive and surrounding whitespace is ignored. `path` is
/// required; `items` names the items subfolder and defaults to `blogsitems`.
/// Other keys are kept and available through [`ConnectionString::property`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    properties: Vec<(String, String)>,
}

impl ConnectionString {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn path(&self) -> &str {
        // Presence is checked when parsing.
        self.property("path").unwrap_or_default()
    }

    pub fn items_folder(&self) -> &str {
        self.property("items")
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ITEMS_FOLDER)
    }
}

impl std::str::FromStr for ConnectionString {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self> {
        let mut properties: Vec<(String, String)> = Vec::new();
        for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                BlogError::Config(format!("connection string entry without '=': {:?}", part))
            })?;
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(BlogError::Config(format!(
                    "connection string entry without a key: {:?}",
                    part
                )));
            }
            let value = value.trim().to_string();
            match properties.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => properties.push((key, value)),
            }
        }

        let connection = ConnectionString { properties };
        if connection.property("path").is_none_or(str::is_empty) {
            return Err(BlogError::Config(
                "connection string has no 'path' property".to_string(),
            ));
        }
        Ok(connection)
    }
}
