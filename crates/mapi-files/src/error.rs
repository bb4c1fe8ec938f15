//! Error types for bundle file operations.

use thiserror::Error;

/// Errors raised while building or exporting a bundle.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Path is empty, absolute, or not valid UTF-8.
    #[error("Invalid bundle path: {path}")]
    InvalidPath {
        /// Offending path
        path: String,
    },

    /// Path contains a `.` or `..` component or an empty segment.
    #[error("Path contains a forbidden component: {path}")]
    InvalidPathComponent {
        /// Offending path
        path: String,
    },

    /// File is not present in the bundle.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Missing path
        path: String,
    },

    /// Export target exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// Offending path
        path: String,
    },

    /// Filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path being accessed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    /// Returns `true` for path validation failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapi_files::FilesError;
    ///
    /// let err = FilesError::InvalidPathComponent { path: "../x".to_string() };
    /// assert!(err.is_invalid_path());
    /// ```
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` if a file was not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` for filesystem failures.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }
}

/// Result alias for bundle file operations.
pub type Result<T> = std::result::Result<T, FilesError>;
