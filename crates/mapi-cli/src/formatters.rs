//! Output formatters for CLI commands.
//!
//! Provides consistent formatting across all CLI commands for JSON, text, and pretty output modes.

use anyhow::Result;
use mapi_core::cli::OutputFormat;
use serde::Serialize;

/// Human-readable rendering used by [`OutputFormat::Pretty`].
pub trait PrettyPrint {
    /// Renders the value for a terminal.
    fn pretty(&self) -> String;
}

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use mapi_cli::formatters::{PrettyPrint, format_output};
/// use mapi_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     files: usize,
/// }
///
/// impl PrettyPrint for Summary {
///     fn pretty(&self) -> String {
///         format!("{} files", self.files)
///     }
/// }
///
/// let summary = Summary { files: 3 };
/// assert_eq!(format_output(&summary, OutputFormat::Text)?, r#"{"files":3}"#);
/// assert_eq!(format_output(&summary, OutputFormat::Pretty)?, "3 files");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize + PrettyPrint>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => json::format_compact(data),
        OutputFormat::Pretty => Ok(data.pretty()),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON.
    ///
    /// Uses pretty-printing with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format data as compact JSON (no formatting).
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        count: i32,
    }

    impl PrettyPrint for TestData {
        fn pretty(&self) -> String {
            format!("{}: {}", self.name, self.count)
        }
    }

    fn data() -> TestData {
        TestData {
            name: "test".to_string(),
            count: 42,
        }
    }

    #[test]
    fn test_json_format() {
        let output = format_output(&data(), OutputFormat::Json).unwrap();
        assert_eq!(output, "{\n  \"name\": \"test\",\n  \"count\": 42\n}");
    }

    #[test]
    fn test_text_format_is_compact() {
        let output = format_output(&data(), OutputFormat::Text).unwrap();
        assert!(!output.contains('\n'));
        assert_eq!(output, "{\"name\":\"test\",\"count\":42}");
    }

    #[test]
    fn test_pretty_format_uses_trait() {
        assert_eq!(format_output(&data(), OutputFormat::Pretty).unwrap(), "test: 42");
    }
}
