//! Builder for bundle filesystems.
//!
//! # Examples
//!
//! ```
//! use mapi_core::SkillOutput;
//! use mapi_files::FilesBuilder;
//!
//! let mut output = SkillOutput::new("# Demo\n".to_string());
//! output.common.insert("auth.md".to_string(), "# Authentication\n".to_string());
//!
//! let files = FilesBuilder::from_skill_output(&output).build().unwrap();
//! assert!(files.exists("Skill.md"));
//! assert!(files.exists("common/auth.md"));
//! ```

use crate::error::{FilesError, Result};
use crate::filesystem::BundleFiles;
use mapi_core::SkillOutput;
use std::path::{Path, PathBuf};

/// Fluent builder for [`BundleFiles`].
///
/// Path errors are collected while adding and the first one is returned
/// by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct FilesBuilder {
    files: BundleFiles,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out a generated bundle: `Skill.md`, `common/<path>` and
    /// `capabilities/<path>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapi_core::SkillOutput;
    /// use mapi_files::FilesBuilder;
    ///
    /// let mut output = SkillOutput::new("# Demo\n".to_string());
    /// output.capabilities.insert("../escape.md".to_string(), String::new());
    ///
    /// assert!(FilesBuilder::from_skill_output(&output).build().is_err());
    /// ```
    #[must_use]
    pub fn from_skill_output(output: &SkillOutput) -> Self {
        output
            .files()
            .fold(Self::new(), |builder, (path, content)| builder.add_file(path, content))
    }

    /// Adds a file.
    #[must_use]
    pub fn add_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        if let Err(e) = self.files.add_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several files.
    #[must_use]
    pub fn add_files<P, C>(self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        files
            .into_iter()
            .fold(self, |builder, (path, content)| builder.add_file(path, content))
    }

    /// Number of files added so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.file_count()
    }

    /// Returns the built bundle.
    ///
    /// # Errors
    ///
    /// Returns the first path error encountered while adding files.
    pub fn build(self) -> Result<BundleFiles> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.files),
        }
    }

    /// Builds the bundle and writes it under `base`.
    ///
    /// A leading `~` in `base` expands to the home directory.
    ///
    /// # Errors
    ///
    /// Returns error if a path was invalid, the home directory cannot be
    /// determined, or the export fails.
    pub fn build_and_export(self, base: impl AsRef<Path>) -> Result<BundleFiles> {
        let files = self.build()?;
        files.export_to_filesystem(expand_tilde(base.as_ref())?)?;
        Ok(files)
    }
}

fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    let home = dirs::home_dir().ok_or_else(|| FilesError::IoError {
        path: path.display().to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "cannot determine home directory"),
    })?;
    Ok(home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_builder() {
        let files = FilesBuilder::new().build().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_from_skill_output_layout() {
        let mut output = SkillOutput::new("# Demo\n".to_string());
        output
            .common
            .insert("schemas/types.md".to_string(), "# Shared Types\n".to_string());
        output
            .capabilities
            .insert("users.get.md".to_string(), "# Capability: Get\n".to_string());

        let files = FilesBuilder::from_skill_output(&output).build().unwrap();
        let paths: Vec<_> = files.files().map(|(path, _)| path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["Skill.md", "capabilities/users.get.md", "common/schemas/types.md"]
        );
    }

    #[test]
    fn test_first_error_returned() {
        let err = FilesBuilder::new()
            .add_file("ok.md", "")
            .add_file("/abs.md", "")
            .add_file("../up.md", "")
            .build()
            .unwrap_err();
        assert!(matches!(err, FilesError::InvalidPath { .. }));
    }

    #[test]
    fn test_add_files() {
        let builder = FilesBuilder::new().add_files([("a.md", "1"), ("b/c.md", "2")]);
        assert_eq!(builder.file_count(), 2);
    }

    #[test]
    fn test_build_and_export() {
        let temp = TempDir::new().unwrap();
        let files = FilesBuilder::new()
            .add_file("Skill.md", "# X\n")
            .build_and_export(temp.path())
            .unwrap();

        assert_eq!(files.file_count(), 1);
        assert_eq!(fs::read_to_string(temp.path().join("Skill.md")).unwrap(), "# X\n");
    }

    #[test]
    fn test_expand_tilde() {
        let plain = Path::new("/tmp/out");
        assert_eq!(expand_tilde(plain).unwrap(), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/skills")).unwrap(), home.join("skills"));
            assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
        }
    }
}
