//! Filesystem operations confined beneath a single root.
//!
//! All operations take paths already vetted by the resolver and report
//! errors in host-relative terms. Each call is a single shot against the
//! host filesystem: no locking bridges the gap between an existence check
//! and the operation that follows it, so anything that vanishes in between
//! surfaces as not-found or absent metadata rather than a crash.

use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::os::unix::fs::PermissionsExt;

use rootbox_types::{DirEntry, FileItem, Item, ItemCollection, WriteSpec};

use crate::error::{FsError, FsResult};
use crate::meta::stat;
use crate::root::{ResolvedPath, RootDir};

/// The one file extension accepted for reads, without the leading dot.
pub const TEXT_EXTENSION: &str = "txt";

/// Filesystem operations over a confined root.
///
/// Holds only the immutable root, so it can be cloned or shared across
/// concurrent request tasks freely.
#[derive(Debug, Clone)]
pub struct FsOps {
    root: RootDir,
}

impl FsOps {
    pub fn new(root: RootDir) -> Self {
        Self { root }
    }

    /// The resolver for this root; handlers use it to vet incoming paths.
    pub fn root(&self) -> &RootDir {
        &self.root
    }

    /// Directory or file details at `path`, as one collection.
    ///
    /// Directories delegate to [`FsOps::list_dir`], files to
    /// [`FsOps::read_file`] as a singleton item sequence. Paths with an
    /// extension other than `.txt` are refused before the dispatch;
    /// extensionless paths always pass.
    pub fn path_items(&self, path: &ResolvedPath) -> FsResult<ItemCollection> {
        let host = self.root.host_path(path);

        if !path.as_path().exists() {
            return Err(FsError::NotFound(host));
        }

        if let Some(extension) = path.as_path().extension() {
            if extension != TEXT_EXTENSION {
                return Err(FsError::UnsupportedContentType(host));
            }
        }

        let items = if path.as_path().is_dir() {
            self.list_dir(path)?.into_iter().map(Item::Entry).collect()
        } else {
            vec![Item::File(self.read_file(path)?)]
        };

        Ok(ItemCollection::new(host, items))
    }

    /// Immediate children of a directory, in the order the host yields
    /// them. No recursion, no sorting.
    ///
    /// Metadata is captured per child; a child that cannot be stat'd (race
    /// with deletion, broken symlink) keeps its name and gets absent
    /// metadata instead of failing the listing.
    pub fn list_dir(&self, path: &ResolvedPath) -> FsResult<Vec<DirEntry>> {
        let read = fs::read_dir(path).map_err(|e| self.io_error(path, e))?;

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|e| self.io_error(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let meta = stat(path.child(&name));
            entries.push(DirEntry {
                name,
                owner: meta.owner,
                size: meta.size,
                permissions: meta.permissions,
            });
        }

        Ok(entries)
    }

    /// A file's info and entire textual content, read eagerly.
    ///
    /// The item's name is the file's base name, independent of any
    /// directory prefix in `path`. Any read failure is an I/O error, even
    /// a file that vanished after the caller's existence check.
    pub fn read_file(&self, path: &ResolvedPath) -> FsResult<FileItem> {
        let content = fs::read_to_string(path).map_err(|e| self.io_error(path, e))?;
        let meta = stat(path);

        Ok(FileItem {
            name: path.base_name().to_string(),
            owner: meta.owner,
            size: meta.size,
            permissions: meta.permissions,
            content,
        })
    }

    /// Append `spec.content` to `dir/spec.name`, creating the file if
    /// absent. Repeated writes accumulate. Returns the file path so the
    /// caller can re-read it for the response.
    ///
    /// `spec.permissions` and `spec.owner` apply to the containing
    /// directory, not the written file; the owner change leaves the group
    /// untouched. Callers have observed the directory-targeted behavior,
    /// so it stays.
    pub fn write_file(&self, dir: &ResolvedPath, spec: &WriteSpec) -> FsResult<ResolvedPath> {
        let file_path = dir.child(&spec.name);

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&file_path)
            .map_err(|e| self.io_error(&file_path, e))?;

        if let Some(content) = &spec.content {
            file.write_all(content.as_bytes())
                .map_err(|e| self.io_error(&file_path, e))?;
        }

        if let Some(mode) = spec.permissions {
            fs::set_permissions(dir, fs::Permissions::from_mode(mode))
                .map_err(|e| self.io_error(dir, e))?;
        }

        if let Some(uid) = spec.owner {
            std::os::unix::fs::chown(dir, Some(uid), None)
                .map_err(|e| self.io_error(dir, e))?;
        }

        Ok(file_path)
    }

    /// Create `parent/name`. Missing intermediate parents are not created.
    pub fn make_dir(&self, parent: &ResolvedPath, name: &str) -> FsResult<ResolvedPath> {
        let dir_path = parent.child(name);

        fs::create_dir(&dir_path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => {
                FsError::AlreadyExists(self.root.host_path(&dir_path))
            }
            io::ErrorKind::NotFound => FsError::NotFound(self.root.host_path(parent)),
            _ => self.io_error(&dir_path, e),
        })?;

        Ok(dir_path)
    }

    /// Remove an empty directory. Returns nothing on success; callers that
    /// need the directory's contents for a response must fetch them before
    /// calling, since removal destroys them.
    pub fn remove_dir(&self, path: &ResolvedPath) -> FsResult<()> {
        fs::remove_dir(path).map_err(|e| match e.kind() {
            io::ErrorKind::DirectoryNotEmpty => FsError::NotEmpty(self.root.host_path(path)),
            io::ErrorKind::NotFound => FsError::NotFound(self.root.host_path(path)),
            _ => self.io_error(path, e),
        })
    }

    /// Delete a file. Same ordering contract as [`FsOps::remove_dir`]: the
    /// caller fetches content and metadata first.
    pub fn remove_file(&self, path: &ResolvedPath) -> FsResult<()> {
        fs::remove_file(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(self.root.host_path(path)),
            _ => self.io_error(path, e),
        })
    }

    fn io_error(&self, path: &ResolvedPath, source: io::Error) -> FsError {
        FsError::io(self.root.host_path(path), source)
    }
}
