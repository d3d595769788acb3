//! # rootbox-core
//!
//! Root-confined path resolution and filesystem operations.
//!
//! The pieces, leaf first:
//!
//! - [`RootDir`] / [`ResolvedPath`] - turn untrusted relative paths into
//!   absolute paths under the configured root, and translate back to
//!   host-relative paths for responses
//! - [`stat`] - ownership, size and permission bits, degrading to an
//!   all-absent triple when the object cannot be stat'd
//! - [`FsOps`] - listing, reading, writing, creating and removing files
//!   and directories, built on the two above
//!
//! Everything here is synchronous and blocking. There is no shared mutable
//! state beyond the immutable root, so an [`FsOps`] can be invoked
//! concurrently from as many calling contexts as the serving layer likes.
//! Check-then-act races with concurrent external mutation are inherent and
//! accepted: operations degrade to absent metadata or a not-found error
//! rather than failing the whole request.

pub mod error;
pub mod meta;
pub mod ops;
pub mod root;

pub use error::{FsError, FsResult};
pub use meta::{ItemMeta, stat};
pub use ops::{FsOps, TEXT_EXTENSION};
pub use root::{ResolvedPath, RootDir};
