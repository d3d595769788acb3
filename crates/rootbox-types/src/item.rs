//! Item types produced by filesystem operations.

use serde::{Deserialize, Serialize};

/// One directory child: name plus whatever metadata could be read for it.
///
/// Metadata fields are `None` (serialized as `null`) when the entry could
/// not be stat'd, e.g. a broken symlink or an entry deleted between the
/// listing and the stat call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub owner: Option<u32>,
    pub size: Option<u64>,
    pub permissions: Option<u32>,
}

/// A file read in full: directory-entry metadata plus textual content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub name: String,
    pub owner: Option<u32>,
    pub size: Option<u64>,
    pub permissions: Option<u32>,
    pub content: String,
}

/// Either kind of item in a collection.
///
/// Untagged: a file item is a directory entry plus `content`, so `File`
/// must come first for deserialization to pick the richer shape when the
/// key is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    File(FileItem),
    Entry(DirEntry),
}

impl Item {
    /// The item's name regardless of kind.
    pub fn name(&self) -> &str {
        match self {
            Item::File(file) => &file.name,
            Item::Entry(entry) => &entry.name,
        }
    }
}

/// Per-request response body: host-relative path, item count, items.
///
/// Built fresh for every request, never persisted. `host_path` serializes
/// as `path` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCollection {
    #[serde(rename = "path")]
    pub host_path: String,
    pub count: usize,
    pub items: Vec<Item>,
}

impl ItemCollection {
    /// Build a collection; `count` always mirrors `items.len()`.
    pub fn new(host_path: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            host_path: host_path.into(),
            count: items.len(),
            items,
        }
    }
}

/// Payload for a file write: target name plus optional content and
/// metadata updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl WriteSpec {
    /// Content-only write, the common case.
    pub fn content(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            permissions: None,
            content: Some(content.into()),
        }
    }
}
