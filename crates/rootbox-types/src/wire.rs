//! Wire schema for the TCP surface.
//!
//! One JSON object per line in each direction: the client writes a
//! [`Request`], the server answers with exactly one [`Response`]. Requests
//! carry root-relative paths; responses only ever show host-relative paths.

use serde::{Deserialize, Serialize};

use crate::item::{ItemCollection, WriteSpec};

/// Client request.
///
/// `path` is the caller's root-relative path and may be omitted, empty, or
/// start with a separator; the server normalizes it. Mutating requests
/// address a containing directory via `path` and the target object via a
/// separate name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// List a directory or read a file.
    List {
        #[serde(default)]
        path: Option<String>,
    },
    /// Append to (or create) a file under a directory.
    Write {
        #[serde(default)]
        path: Option<String>,
        item: WriteSpec,
    },
    /// Create a subdirectory.
    MakeDir {
        #[serde(default)]
        path: Option<String>,
        name: String,
    },
    /// Remove an empty subdirectory.
    RemoveDir {
        #[serde(default)]
        path: Option<String>,
        name: String,
    },
    /// Remove a file.
    RemoveFile {
        #[serde(default)]
        path: Option<String>,
        name: String,
    },
}

/// Abstract error category, not tied to any transport status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    UnsupportedContentType,
    AlreadyExists,
    NotEmpty,
    Io,
}

/// Server response: the items for the request, or one categorized error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(ItemCollection),
    Err { kind: ErrorKind, message: String },
}
