//! Input format detection.
//!
//! Detection is a substring check for format markers. MAPI markers win
//! over OpenAPI markers, so a MAPI document that mentions `openapi:` in
//! prose is still routed to the MAPI parser.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const MAPI_MARKERS: [&str; 2] = ["~~~meta", ".mapi.md"];
const OPENAPI_MARKERS: [&str; 4] = ["openapi:", "\"openapi\"", "swagger:", "\"swagger\""];

/// Detected input format.
///
/// # Examples
///
/// ```
/// use mapi_core::SpecFormat;
///
/// assert_eq!(SpecFormat::detect("openapi: 3.0.0\ninfo: {}"), SpecFormat::OpenApi);
/// assert_eq!(SpecFormat::detect("# API\n~~~meta\nversion: 1\n~~~"), SpecFormat::Mapi);
/// assert_eq!(SpecFormat::detect("just prose"), SpecFormat::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    /// MAPI markdown
    Mapi,
    /// OpenAPI or Swagger, JSON or YAML
    #[serde(rename = "openapi")]
    OpenApi,
    /// Neither format was recognized
    Unknown,
}

impl SpecFormat {
    /// Detects the format of raw document text.
    #[must_use]
    pub fn detect(content: &str) -> Self {
        if MAPI_MARKERS.iter().any(|marker| content.contains(marker)) {
            Self::Mapi
        } else if OPENAPI_MARKERS.iter().any(|marker| content.contains(marker)) {
            Self::OpenApi
        } else {
            Self::Unknown
        }
    }

    /// Detects the format, using the file name as an extra MAPI hint.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapi_core::SpecFormat;
    ///
    /// assert_eq!(SpecFormat::detect_with_name("# Notes", "billing.mapi.md"), SpecFormat::Mapi);
    /// assert_eq!(SpecFormat::detect_with_name("# Notes", "notes.md"), SpecFormat::Unknown);
    /// ```
    #[must_use]
    pub fn detect_with_name(content: &str, file_name: &str) -> Self {
        if file_name.ends_with(".mapi.md") {
            Self::Mapi
        } else {
            Self::detect(content)
        }
    }

    /// Returns the format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mapi => "mapi",
            Self::OpenApi => "openapi",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` unless detection failed.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mapi" => Ok(Self::Mapi),
            "openapi" | "swagger" => Ok(Self::OpenApi),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid format: '{s}' (expected: mapi or openapi)"
            ))),
        }
    }
}
