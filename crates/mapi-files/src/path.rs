//! Validated bundle-relative paths.

use crate::error::{FilesError, Result};
use std::borrow::Borrow;
use std::fmt;

/// Relative, forward-slash separated path inside a bundle.
///
/// Absolute paths, backslashes, empty segments and `.`/`..` components
/// are rejected, so a path can never leave the export directory.
///
/// # Examples
///
/// ```
/// use mapi_files::BundlePath;
///
/// let path = BundlePath::new("capabilities/users.get.md").unwrap();
/// assert_eq!(path.parent(), Some("capabilities"));
///
/// assert!(BundlePath::new("/etc/passwd").is_err());
/// assert!(BundlePath::new("common/../../escape.md").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BundlePath(String);

impl BundlePath {
    /// Validates and wraps a path.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidPath`] for empty or absolute paths and
    /// [`FilesError::InvalidPathComponent`] for traversal components.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();

        if path.is_empty() || path.starts_with('/') || path.contains('\\') || has_drive_prefix(&path)
        {
            return Err(FilesError::InvalidPath { path });
        }

        if path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(FilesError::InvalidPathComponent { path });
        }

        Ok(Self(path))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the directory part, or `None` for a top-level file.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// Iterates over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for BundlePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BundlePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BundlePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
