//! Root-confined path resolution.
//!
//! Every caller-supplied path passes through [`RootDir::resolve`] before
//! any filesystem call. Resolution is string-based on purpose: callers have
//! observed the exact join behavior, including the asymmetry between
//! anchored and unanchored inputs, and depend on it.
//!
//! Traversal segments (`..`) are neither rejected nor canonicalized before
//! the result is used, so a hostile relative path can still name an object
//! outside the root. Known gap, kept because rejecting it would change
//! observable behavior.

use std::fmt;
use std::path::Path;

/// The single directory all operations are confined beneath.
///
/// Constructed once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDir {
    root: String,
}

impl RootDir {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.root
    }

    /// Confine a caller-supplied relative path under this root.
    ///
    /// - empty input resolves to the root itself
    /// - input starting with `/` is treated as already anchored and is
    ///   concatenated verbatim, without separator collapsing
    /// - anything else is joined with exactly one separator
    ///
    /// A single trailing separator is stripped from the result, one level
    /// only: `"/root/"` becomes `"/root"`, `"/root//"` becomes `"/root/"`.
    pub fn resolve(&self, relative: &str) -> ResolvedPath {
        let joined = if relative.is_empty() {
            self.root.clone()
        } else if relative.starts_with('/') {
            format!("{}{}", self.root, relative)
        } else if self.root.is_empty() {
            relative.to_string()
        } else if self.root.ends_with('/') {
            format!("{}{}", self.root, relative)
        } else {
            format!("{}/{}", self.root, relative)
        };

        ResolvedPath(strip_one_trailing_separator(joined))
    }

    /// Translate a resolved path back into the form shown to callers.
    ///
    /// Removes the first occurrence of the root from the path string. Only
    /// the first: a subdirectory that happens to be named like the root
    /// survives untouched. An empty remainder means the path was the root
    /// itself and comes back as `"/"`.
    pub fn host_path(&self, path: &ResolvedPath) -> String {
        let stripped = path.0.replacen(&self.root, "", 1);
        if stripped.is_empty() {
            "/".to_string()
        } else {
            stripped
        }
    }
}

impl fmt::Display for RootDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)
    }
}

/// An absolute path produced by [`RootDir::resolve`].
///
/// The only ways to obtain one are the resolver and [`ResolvedPath::child`],
/// so operations taking this type know confinement already happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Append one child component with exactly one separator.
    pub fn child(&self, name: &str) -> ResolvedPath {
        if self.0.is_empty() {
            ResolvedPath(name.to_string())
        } else if self.0.ends_with('/') {
            ResolvedPath(format!("{}{}", self.0, name))
        } else {
            ResolvedPath(format!("{}/{}", self.0, name))
        }
    }

    /// Final path component, independent of any directory prefix.
    pub fn base_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

fn strip_one_trailing_separator(mut s: String) -> String {
    if s.ends_with('/') {
        s.pop();
    }
    s
}
