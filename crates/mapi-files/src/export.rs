//! Export of an in-memory bundle to disk.
//!
//! Directories are created in a first pass, then each file is written.
//! With atomic writes enabled (the default) content goes to a sibling
//! `<name>.tmp` file that is renamed over the target, so a reader never
//! sees a partially written document.
//!
//! # Examples
//!
//! ```
//! use mapi_files::BundleFiles;
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! let mut files = BundleFiles::new();
//! files.add_file("Skill.md", "# Demo\n").unwrap();
//! files.add_file("capabilities/ping.md", "# Capability: Ping\n").unwrap();
//!
//! let out = temp.path().join("skill-output");
//! files.export_to_filesystem(&out).unwrap();
//!
//! assert!(out.join("capabilities/ping.md").exists());
//! ```

use crate::error::{FilesError, Result};
use crate::filesystem::BundleFiles;
use crate::path::BundlePath;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for disk export.
///
/// # Examples
///
/// ```
/// use mapi_files::ExportOptions;
///
/// let options = ExportOptions::default().with_overwrite(false);
/// assert!(options.atomic);
/// assert!(!options.overwrite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write to a temp file, then rename
    pub atomic: bool,
    /// Replace files that already exist
    pub overwrite: bool,
}

impl ExportOptions {
    /// Atomic, overwriting export.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atomic: true,
            overwrite: true,
        }
    }

    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Sets whether to overwrite existing files.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleFiles {
    /// Writes every file under `base`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns error if `base` is not a directory or any I/O operation
    /// fails.
    pub fn export_to_filesystem(&self, base: impl AsRef<Path>) -> Result<()> {
        self.export_to_filesystem_with_options(base, &ExportOptions::default())
    }

    /// Writes every file under `base` with custom options.
    ///
    /// # Errors
    ///
    /// Returns error if `base` is not a directory or any I/O operation
    /// fails.
    pub fn export_to_filesystem_with_options(
        &self,
        base: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Result<()> {
        let base = base.as_ref();
        if base.exists() && !base.is_dir() {
            return Err(FilesError::NotADirectory {
                path: base.display().to_string(),
            });
        }
        fs::create_dir_all(base).map_err(|e| io_error(base, e))?;

        for dir in self.collect_directories(base) {
            fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        }

        for (path, content) in self.files() {
            write_file(&disk_path(base, path), content, options)?;
        }

        debug!(
            base = %base.display(),
            files = self.file_count(),
            bytes = self.total_bytes(),
            "exported bundle"
        );
        Ok(())
    }

    fn collect_directories(&self, base: &Path) -> BTreeSet<PathBuf> {
        self.files()
            .filter_map(|(path, _)| path.parent())
            .map(|parent| parent.split('/').fold(base.to_path_buf(), |dir, segment| dir.join(segment)))
            .collect()
    }
}

fn disk_path(base: &Path, path: &BundlePath) -> PathBuf {
    path.segments().fold(base.to_path_buf(), |dir, segment| dir.join(segment))
}

fn write_file(path: &Path, content: &str, options: &ExportOptions) -> Result<()> {
    if !options.overwrite && path.exists() {
        debug!(path = %path.display(), "skipping existing file");
        return Ok(());
    }

    if !options.atomic {
        return fs::write(path, content).map_err(|e| io_error(path, e));
    }

    let temp_path = temp_path(path);
    let mut file = fs::File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| io_error(&temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(path, e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> FilesError {
    FilesError::IoError {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bundle(entries: &[(&str, &str)]) -> BundleFiles {
        let mut files = BundleFiles::new();
        for (path, content) in entries {
            files.add_file(*path, *content).unwrap();
        }
        files
    }

    #[test]
    fn test_export_creates_base_and_parents() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("nested/out");
        bundle(&[("Skill.md", "# A\n"), ("common/schemas/types.md", "# Shared Types\n")])
            .export_to_filesystem(&out)
            .unwrap();

        assert_eq!(fs::read_to_string(out.join("Skill.md")).unwrap(), "# A\n");
        assert_eq!(
            fs::read_to_string(out.join("common/schemas/types.md")).unwrap(),
            "# Shared Types\n"
        );
    }

    #[test]
    fn test_export_overwrites_by_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Skill.md"), "old").unwrap();

        bundle(&[("Skill.md", "new")])
            .export_to_filesystem(temp.path())
            .unwrap();
        assert_eq!(fs::read_to_string(temp.path().join("Skill.md")).unwrap(), "new");
    }

    #[test]
    fn test_export_without_overwrite_keeps_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Skill.md"), "old").unwrap();

        let options = ExportOptions::default().with_overwrite(false);
        bundle(&[("Skill.md", "new"), ("common/auth.md", "auth")])
            .export_to_filesystem_with_options(temp.path(), &options)
            .unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("Skill.md")).unwrap(), "old");
        assert!(temp.path().join("common/auth.md").exists());
    }

    #[test]
    fn test_atomic_export_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        bundle(&[("capabilities/users.get.md", "x")])
            .export_to_filesystem(temp.path())
            .unwrap();

        let names: Vec<_> = fs::read_dir(temp.path().join("capabilities"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["users.get.md"]);
    }

    #[test]
    fn test_non_atomic_export() {
        let temp = TempDir::new().unwrap();
        let options = ExportOptions::default().with_atomic_writes(false);
        bundle(&[("Skill.md", "direct")])
            .export_to_filesystem_with_options(temp.path(), &options)
            .unwrap();
        assert_eq!(fs::read_to_string(temp.path().join("Skill.md")).unwrap(), "direct");
    }

    #[test]
    fn test_export_into_file_fails() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("occupied");
        fs::write(&target, "").unwrap();

        let err = bundle(&[("Skill.md", "")])
            .export_to_filesystem(&target)
            .unwrap_err();
        assert!(matches!(err, FilesError::NotADirectory { .. }));
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(
            temp_path(Path::new("/out/capabilities/users.get.md")),
            PathBuf::from("/out/capabilities/users.get.md.tmp")
        );
    }

    #[test]
    fn test_export_options_default() {
        let options = ExportOptions::default();
        assert!(options.atomic);
        assert!(options.overwrite);
    }
}
