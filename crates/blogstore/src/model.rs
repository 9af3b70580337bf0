//! # Domain Model: Headers, Items and the Index
//!
//! This module defines the core data structures for blogstore: [`Header`],
//! [`Item`], [`Attachment`] and [`Index`].
//!
//! ## Header vs Item
//!
//! A blog entry is split in two:
//!
//! ```text
//! Item
//! ├── Header      <-- metadata, kept in the index for listing and search
//! ├── Content     <-- body text, only read when the entry is loaded
//! └── Files       <-- attachment descriptors
//! ```
//!
//! Listing never touches bodies. The index holds headers only, and each item
//! is persisted separately under its encoded id.
//!
//! ## Lifecycle
//!
//! - **Transient**: created by a caller, `id` is `None`.
//! - **Persistent**: the first successful save assigns the id and appends the
//!   header to the index. Later saves replace it in place.
//! - **Deleted**: a state, not a removal. Deleted headers stay in the index and
//!   are hidden from default listings. Nothing transitions out of `Deleted`.
//!
//! ## Serialized Form
//!
//! Fields are written in PascalCase (`Id`, `State`, `UpdatedDate`, ...) so the
//! files stay readable by older tooling that shares the same layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeaderState {
    Deleted,
    #[default]
    Unpublished,
    Published,
}

impl std::fmt::Display for HeaderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderState::Deleted => write!(f, "deleted"),
            HeaderState::Unpublished => write!(f, "unpublished"),
            HeaderState::Published => write!(f, "published"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    /// Encoded identity. `None` until the first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub state: HeaderState,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    pub updated_date: DateTime<Utc>,
}

impl Header {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: None,
            state: HeaderState::Unpublished,
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            author: author.into(),
            published_date: None,
            updated_date: Utc::now(),
        }
    }

    /// A bare reference to an existing entry, as accepted by `load` and `delete`.
    pub fn reference(id: impl Into<String>) -> Self {
        let mut header = Self::new("", "");
        header.id = Some(id.into());
        header
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the entry published at the given instant.
    pub fn publish(&mut self, at: DateTime<Utc>) {
        self.state = HeaderState::Published;
        self.published_date = Some(at);
    }

    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn is_deleted(&self) -> bool {
        self.state == HeaderState::Deleted
    }

    /// Date used for range filters and date sorting: published date when
    /// set, otherwise the last update.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.published_date.unwrap_or(self.updated_date)
    }

    pub(crate) fn id_str(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A file attached to an entry. The store keeps the descriptor only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    pub file_name: String,
    #[serde(default)]
    pub reference: String,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            reference: reference.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    pub header: Header,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub files: Vec<Attachment>,
}

impl Item {
    pub fn new(header: Header, content: impl Into<String>) -> Self {
        Self {
            header,
            content: content.into(),
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<Attachment>) -> Self {
        self.files = files;
        self
    }

    /// Copy of this item with the body and attachments stripped.
    pub fn header_only(&self) -> Item {
        Item::new(self.header.clone(), "")
    }
}

/// Ordered collection of every header in a store.
///
/// Insertion order is preserved and ids are unique. `initialised` is runtime
/// state and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Index {
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(skip)]
    pub initialised: bool,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from raw headers, collapsing duplicate ids.
    ///
    /// A later header with an already-seen id replaces the earlier one at the
    /// earlier position.
    pub fn from_headers(headers: Vec<Header>) -> Self {
        let mut index = Index::new();
        for header in headers {
            match header.id_str().and_then(|id| index.position(id)) {
                Some(pos) => {
                    tracing::warn!(id = header.id_str(), "duplicate id in index, keeping last");
                    index.headers[pos] = header;
                }
                None => index.headers.push(header),
            }
        }
        index
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.id_str() == Some(id))
    }

    pub fn get(&self, id: &str) -> Option<&Header> {
        self.position(id).map(|pos| &self.headers[pos])
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Replace the header with the same id, or append it if the id is new.
    pub fn upsert(&mut self, header: Header) {
        match header.id_str().and_then(|id| self.position(id)) {
            Some(pos) => self.headers[pos] = header,
            None => self.headers.push(header),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().filter_map(Header::id_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted(id: &str, name: &str) -> Header {
        let mut header = Header::new(name, "ann");
        header.id = Some(id.to_string());
        header
    }

    #[test]
    fn test_new_header_is_transient_and_unpublished() {
        let header = Header::new("Hello", "ann");
        assert!(!header.is_persisted());
        assert_eq!(header.state, HeaderState::Unpublished);
        assert!(header.published_date.is_none());
        assert!(header.tags.is_empty());
    }

    #[test]
    fn test_empty_id_is_not_persisted() {
        let mut header = Header::new("Hello", "ann");
        header.id = Some(String::new());
        assert!(!header.is_persisted());
    }

    #[test]
    fn test_publish_sets_state_and_date() {
        let mut header = Header::new("Hello", "ann");
        let at = Utc::now();
        header.publish(at);
        assert_eq!(header.state, HeaderState::Published);
        assert_eq!(header.published_date, Some(at));
        assert_eq!(header.effective_date(), at);
    }

    #[test]
    fn test_header_only_strips_body_and_files() {
        let item = Item::new(Header::new("Hello", "ann"), "body")
            .with_files(vec![Attachment::new("a.png", "blob://1")]);
        let stripped = item.header_only();
        assert_eq!(stripped.header, item.header);
        assert!(stripped.content.is_empty());
        assert!(stripped.files.is_empty());
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut index = Index::new();
        index.upsert(persisted("a", "A"));
        index.upsert(persisted("b", "B"));
        index.upsert(persisted("a", "A2"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.headers[0].name, "A2");
        assert_eq!(index.headers[1].name, "B");
    }

    #[test]
    fn test_from_headers_collapses_duplicates() {
        let index = Index::from_headers(vec![
            persisted("a", "first"),
            persisted("b", "B"),
            persisted("a", "last"),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").unwrap().name, "last");
        assert_eq!(index.position("a"), Some(0));
    }

    #[test]
    fn test_serialized_field_names() {
        let mut header = persisted("abc", "Hello");
        header.tags = vec!["rust".into()];
        let json = serde_json::to_value(&header).unwrap();
        for key in ["Id", "State", "Name", "Description", "Tags", "Author", "UpdatedDate"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["State"], "Unpublished");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"Id":"abc","UpdatedDate":"2024-01-01T00:00:00Z"}"#;
        let header: Header = serde_json::from_str(json).unwrap();
        assert_eq!(header.id.as_deref(), Some("abc"));
        assert_eq!(header.state, HeaderState::Unpublished);
        assert!(header.name.is_empty());
    }

    #[test]
    fn test_missing_updated_date_is_rejected() {
        let json = r#"{"Id":"abc","Name":"x"}"#;
        assert!(serde_json::from_str::<Header>(json).is_err());
    }

    #[test]
    fn test_initialised_flag_is_not_persisted() {
        let mut index = Index::new();
        index.initialised = true;
        let json = serde_json::to_string(&index).unwrap();
        assert!(!json.contains("nitialised"));
        let back: Index = serde_json::from_str(&json).unwrap();
        assert!(!back.initialised);
    }
}
