//! Template contexts for Skill documents.
//!
//! Every field is always serialized (absent values become `null`) so the
//! templates can run in strict mode.

use mapi_core::{CapabilityIndexEntry, Dependency};
use serde::Serialize;

/// Number of intent keywords shown per row of the index table.
pub const INDEX_KEYWORD_LIMIT: usize = 5;

/// Context for `Skill.md`.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    /// H1 title
    pub api_name: String,
    /// Optional paragraph under the title
    pub description: Option<String>,
    /// `key: value` lines of the metadata block
    pub meta: Vec<String>,
    /// Rows of the common dependencies table
    pub common: Vec<CommonRow>,
    /// Rows of the capabilities table, in source order
    pub capabilities: Vec<CapabilityRow>,
}

/// One row of the common dependencies table.
#[derive(Debug, Clone, Serialize)]
pub struct CommonRow {
    /// Path relative to `common/`
    pub file: String,
    /// Short description inferred from the file name
    pub description: &'static str,
}

impl CommonRow {
    /// Creates a row, inferring the description from the file name.
    #[must_use]
    pub fn new(file: &str) -> Self {
        let description = if file.contains("auth") {
            "Authentication setup"
        } else if file.contains("schema") {
            "Shared type definitions"
        } else if file.contains("pagination") {
            "Pagination conventions"
        } else {
            "Common definitions"
        };
        Self {
            file: file.to_string(),
            description,
        }
    }
}

/// One row of the capabilities table.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityRow {
    /// Capability id
    pub id: String,
    /// First keywords, comma separated
    pub keywords: String,
    /// Path of the capability document
    pub file_path: String,
    /// Dependency names, comma separated, or `-`
    pub dependencies: String,
}

impl From<&CapabilityIndexEntry> for CapabilityRow {
    fn from(entry: &CapabilityIndexEntry) -> Self {
        let keywords = entry
            .intent_keywords
            .iter()
            .take(INDEX_KEYWORD_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let dependencies = if entry.dependencies.is_empty() {
            "-".to_string()
        } else {
            entry
                .dependencies
                .iter()
                .map(Dependency::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            id: entry.id.clone(),
            keywords,
            file_path: entry.file_path.clone(),
            dependencies,
        }
    }
}

/// Context for one capability document.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityContext {
    /// H1 heading, e.g. `Webhook: Order Paid`
    pub heading: String,
    /// `key: value` lines of the metadata block
    pub meta: Vec<String>,
    /// Non-empty sections in document order
    pub sections: Vec<Section>,
}

/// A `##` section of a capability document.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Section title
    pub title: &'static str,
    /// Section body, without surrounding blank lines
    pub body: String,
}

impl Section {
    /// Returns a prose section when `body` is present and non-blank.
    #[must_use]
    pub fn prose(title: &'static str, body: Option<&str>) -> Option<Self> {
        body.filter(|b| !b.trim().is_empty()).map(|b| Self {
            title,
            body: b.to_string(),
        })
    }

    /// Returns a section wrapping `source` in a TypeScript fence.
    #[must_use]
    pub fn typescript(title: &'static str, source: Option<&str>) -> Option<Self> {
        source.filter(|s| !s.trim().is_empty()).map(|s| Self {
            title,
            body: format!("```typescript\n{s}\n```"),
        })
    }
}

/// Context for `common/auth.md`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthContext {
    /// Opening sentence naming the scheme
    pub summary: String,
    /// Body of the `Usage` section
    pub usage: Option<String>,
    /// OAuth flow name
    pub flow: Option<String>,
    /// OAuth default scopes
    pub scopes: Vec<String>,
    /// OAuth flow names declared by an OpenAPI scheme
    pub flows: Vec<String>,
    /// Link to external authentication docs
    pub docs_url: Option<String>,
}

/// Context for `common/schemas/types.md`.
#[derive(Debug, Clone, Serialize)]
pub struct TypesContext {
    /// TypeScript source of all shared types
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_row_descriptions() {
        assert_eq!(CommonRow::new("auth.md").description, "Authentication setup");
        assert_eq!(CommonRow::new("schemas/types.md").description, "Shared type definitions");
        assert_eq!(CommonRow::new("pagination.md").description, "Pagination conventions");
        assert_eq!(CommonRow::new("errors.md").description, "Common definitions");
    }

    #[test]
    fn test_capability_row_truncates_keywords() {
        let entry = CapabilityIndexEntry::new(
            "a.b".to_string(),
            ["a", "b", "c", "d", "e", "f"].map(String::from).to_vec(),
            vec![Dependency::Auth, Dependency::SharedTypes],
        );
        let row = CapabilityRow::from(&entry);

        assert_eq!(row.keywords, "a, b, c, d, e");
        assert_eq!(row.file_path, "capabilities/a.b.md");
        assert_eq!(row.dependencies, "auth, schemas/types");
    }

    #[test]
    fn test_capability_row_without_dependencies() {
        let entry = CapabilityIndexEntry::new("x".to_string(), Vec::new(), Vec::new());
        let row = CapabilityRow::from(&entry);
        assert_eq!(row.dependencies, "-");
        assert_eq!(row.keywords, "");
    }

    #[test]
    fn test_blank_sections_are_skipped() {
        assert!(Section::prose("Errors", Some("  \n")).is_none());
        assert!(Section::typescript("Input", None).is_none());
        assert_eq!(
            Section::typescript("Input", Some("type A = string;")).unwrap().body,
            "```typescript\ntype A = string;\n```"
        );
    }
}
