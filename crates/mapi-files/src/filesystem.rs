//! In-memory bundle filesystem.

use crate::error::{FilesError, Result};
use crate::path::BundlePath;
use std::collections::BTreeMap;

/// In-memory set of bundle files keyed by [`BundlePath`].
///
/// Iteration order is lexicographic by path, so exports and listings are
/// deterministic.
///
/// # Examples
///
/// ```
/// use mapi_files::BundleFiles;
///
/// let mut files = BundleFiles::new();
/// files.add_file("Skill.md", "# Demo\n").unwrap();
/// files.add_file("capabilities/users.get.md", "# Capability: Get\n").unwrap();
///
/// assert_eq!(files.read_file("Skill.md").unwrap(), "# Demo\n");
/// assert_eq!(files.list_dir("capabilities"), vec!["capabilities/users.get.md"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleFiles {
    files: BTreeMap<BundlePath, String>,
}

impl BundleFiles {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    ///
    /// # Errors
    ///
    /// Returns error if the path fails validation.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) -> Result<()> {
        let path = BundlePath::new(path)?;
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Reads a file.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if the file is absent.
    pub fn read_file(&self, path: &str) -> Result<&str> {
        self.files
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| FilesError::FileNotFound {
                path: path.to_string(),
            })
    }

    /// Returns `true` if the file exists.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Lists files directly inside `dir` (not recursive).
    #[must_use]
    pub fn list_dir(&self, dir: &str) -> Vec<&str> {
        let dir = dir.trim_end_matches('/');
        self.files
            .keys()
            .filter(|path| path.parent().unwrap_or_default() == dir)
            .map(BundlePath::as_str)
            .collect()
    }

    /// Number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the bundle holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over `(path, content)` pairs in path order.
    pub fn files(&self) -> impl Iterator<Item = (&BundlePath, &str)> {
        self.files.iter().map(|(path, content)| (path, content.as_str()))
    }

    /// Total content size in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(String::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_read() {
        let mut files = BundleFiles::new();
        files.add_file("common/auth.md", "# Authentication\n").unwrap();

        assert!(files.exists("common/auth.md"));
        assert!(!files.exists("common/other.md"));
        assert_eq!(files.read_file("common/auth.md").unwrap(), "# Authentication\n");
        assert!(files.read_file("missing.md").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_replaces_content() {
        let mut files = BundleFiles::new();
        files.add_file("Skill.md", "old").unwrap();
        files.add_file("Skill.md", "new").unwrap();
        assert_eq!(files.file_count(), 1);
        assert_eq!(files.read_file("Skill.md").unwrap(), "new");
    }

    #[test]
    fn test_invalid_path_not_added() {
        let mut files = BundleFiles::new();
        assert!(files.add_file("../escape.md", "x").unwrap_err().is_invalid_path());
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_dir_is_not_recursive() {
        let mut files = BundleFiles::new();
        files.add_file("Skill.md", "").unwrap();
        files.add_file("common/auth.md", "").unwrap();
        files.add_file("common/schemas/types.md", "").unwrap();

        assert_eq!(files.list_dir("common"), vec!["common/auth.md"]);
        assert_eq!(files.list_dir("common/schemas/"), vec!["common/schemas/types.md"]);
        assert_eq!(files.list_dir(""), vec!["Skill.md"]);
    }

    #[test]
    fn test_total_bytes() {
        let mut files = BundleFiles::new();
        files.add_file("a.md", "abc").unwrap();
        files.add_file("b.md", "de").unwrap();
        assert_eq!(files.total_bytes(), 5);
    }
}
