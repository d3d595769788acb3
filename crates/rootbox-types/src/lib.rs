//! # rootbox-types
//!
//! Shared types for the rootbox file service: the items produced by
//! filesystem operations and the wire schema spoken between client and
//! server. Everything here is plain serde data with no behavior attached,
//! so both sides of the connection can depend on it without pulling in the
//! filesystem layer.

mod item;
mod wire;

pub use item::{DirEntry, FileItem, Item, ItemCollection, WriteSpec};
pub use wire::{ErrorKind, Request, Response};
