//! Metadata capture for files and directories.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Ownership, size and permission bits for one filesystem object.
///
/// All fields are `None` when the object could not be stat'd. A failure
/// here is never an error: the object may have vanished between a listing
/// and the stat call, or the stat itself may be denied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemMeta {
    pub owner: Option<u32>,
    pub size: Option<u64>,
    pub permissions: Option<u32>,
}

impl ItemMeta {
    /// The all-absent triple.
    pub const ABSENT: ItemMeta = ItemMeta {
        owner: None,
        size: None,
        permissions: None,
    };
}

/// Stat a path, degrading any failure to the absent triple.
pub fn stat(path: impl AsRef<Path>) -> ItemMeta {
    match fs::metadata(path) {
        Ok(meta) => ItemMeta {
            owner: Some(meta.uid()),
            size: Some(meta.len()),
            permissions: Some(meta.mode()),
        },
        Err(_) => ItemMeta::ABSENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stat_existing_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("tree.txt");
        fs::write(&file, "blabla").unwrap();

        let meta = stat(&file);
        assert_eq!(meta.size, Some(6));
        assert!(meta.owner.is_some());
        assert!(meta.permissions.is_some());
    }

    #[test]
    fn test_stat_directory() {
        let dir = TempDir::new().unwrap();
        let meta = stat(dir.path());
        assert!(meta.owner.is_some());
        assert!(meta.permissions.is_some());
    }

    #[test]
    fn test_stat_missing_path_is_absent() {
        let dir = TempDir::new().unwrap();
        let meta = stat(dir.path().join("nope"));
        assert_eq!(meta, ItemMeta::ABSENT);
    }
}
