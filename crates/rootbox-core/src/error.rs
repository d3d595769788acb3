//! Error taxonomy for filesystem operations.
//!
//! Every variant carries the host-relative path (root prefix stripped), so
//! the internal directory layout never leaks into a message shown to a
//! caller.

use std::io;

use rootbox_types::ErrorKind;
use thiserror::Error;

/// Filesystem operation error.
#[derive(Debug, Error)]
pub enum FsError {
    /// Resolved path does not exist, or vanished mid-operation.
    #[error("The path `{0}` does not exist or you don't have permissions to access it.")]
    NotFound(String),

    /// Requested path has a file extension outside the allowed set.
    #[error("Can only read .txt files: `{0}`")]
    UnsupportedContentType(String),

    /// Directory creation target already present.
    #[error("This directory already exists: `{0}`")]
    AlreadyExists(String),

    /// Directory removal target has children.
    #[error("This directory is not empty. Remove its contents first: `{0}`")]
    NotEmpty(String),

    /// Underlying read/write/remove call failed for a reason not covered
    /// by the variants above (permission denied, disk error).
    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Create an Io error carrying the host-relative path.
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wire-level category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound(_) => ErrorKind::NotFound,
            FsError::UnsupportedContentType(_) => ErrorKind::UnsupportedContentType,
            FsError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            FsError::NotEmpty(_) => ErrorKind::NotEmpty,
            FsError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Filesystem result type.
pub type FsResult<T> = Result<T, FsError>;
