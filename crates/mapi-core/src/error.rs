//! Error types for MAPI Skill conversion.
//!
//! Only a handful of conditions are fatal: an OpenAPI document that
//! declares neither `openapi` nor `swagger`, text that is neither JSON nor
//! YAML, and auto-detection that cannot recognize the input. Everything
//! else (missing sections, malformed capabilities, unresolvable `$ref`s,
//! keyword collaborator failures) degrades to a documented fallback.
//!
//! # Examples
//!
//! ```
//! use mapi_core::{Error, Result};
//!
//! fn require_content(content: &str) -> Result<()> {
//!     if content.is_empty() {
//!         return Err(Error::InvalidArgument("content cannot be empty".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! let err = require_content("").unwrap_err();
//! assert!(err.is_invalid_argument());
//! ```

use thiserror::Error;

/// Main error type for MAPI Skill conversion.
///
/// All library crates in the workspace report failures through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// The document parsed but is not a recognized API description.
    ///
    /// Raised by the OpenAPI parser when neither the `openapi` nor the
    /// `swagger` top-level field is present.
    #[error("Not a valid OpenAPI document: {reason}")]
    InvalidDocument {
        /// Why the document was rejected
        reason: String,
    },

    /// The document text could not be parsed at all.
    #[error("Failed to parse {format} document: {message}")]
    ParseError {
        /// Format that was attempted last (e.g. "YAML")
        format: String,
        /// Description of the parse failure
        message: String,
        /// Underlying parser error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Format auto-detection could not recognize the input.
    #[error("Unable to detect specification format. Expected MAPI or OpenAPI.")]
    UnknownFormat,

    /// The intent keyword collaborator failed for one capability.
    ///
    /// The generator never propagates this error; it logs it and falls
    /// back to the local keyword heuristic.
    #[error("Intent generation failed for '{capability}': {message}")]
    IntentGeneration {
        /// Capability id the keywords were requested for
        capability: String,
        /// Description of the failure
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if the input was rejected as an invalid document.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapi_core::Error;
    ///
    /// let err = Error::InvalidDocument {
    ///     reason: "missing openapi or swagger field".to_string(),
    /// };
    /// assert!(err.is_invalid_document());
    /// ```
    #[must_use]
    pub const fn is_invalid_document(&self) -> bool {
        matches!(self, Self::InvalidDocument { .. })
    }

    /// Returns `true` if the document text could not be parsed.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if format detection failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapi_core::Error;
    ///
    /// assert!(Error::UnknownFormat.is_unknown_format());
    /// ```
    #[must_use]
    pub const fn is_unknown_format(&self) -> bool {
        matches!(self, Self::UnknownFormat)
    }

    /// Returns `true` if this is a keyword collaborator failure.
    #[must_use]
    pub const fn is_intent_generation_error(&self) -> bool {
        matches!(self, Self::IntentGeneration { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_document_detection() {
        let err = Error::InvalidDocument {
            reason: "missing openapi or swagger field".to_string(),
        };
        assert!(err.is_invalid_document());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_invalid_document_display() {
        let err = Error::InvalidDocument {
            reason: "missing openapi or swagger field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Not a valid OpenAPI document: missing openapi or swagger field"
        );
    }

    #[test]
    fn test_unknown_format_display() {
        let display = Error::UnknownFormat.to_string();
        assert!(display.contains("Unable to detect specification format"));
        assert!(display.contains("MAPI or OpenAPI"));
    }

    #[test]
    fn test_intent_generation_detection() {
        let err = Error::IntentGeneration {
            capability: "users.create".to_string(),
            message: "status 500".to_string(),
            source: None,
        };
        assert!(err.is_intent_generation_error());
        assert!(err.to_string().contains("users.create"));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::ParseError {
            format: "JSON".to_string(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        };
        assert!(err.is_parse_error());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_detection() {
        let err = Error::ConfigError {
            message: "max_tokens must be positive".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_unknown_format());
    }
}
