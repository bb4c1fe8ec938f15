//! The in-memory Skill bundle.
//!
//! A bundle is three pieces: the index document (`Skill.md`), shared files
//! under `common/`, and one document per capability under `capabilities/`.
//! Keys in both maps are file names relative to their directory.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Generated Skill bundle.
///
/// # Examples
///
/// ```
/// use mapi_core::SkillOutput;
///
/// let mut output = SkillOutput::new("# Demo\n".to_string());
/// output.capabilities.insert("users.get.md".to_string(), "# Capability: Get user\n".to_string());
///
/// assert_eq!(output.file_count(), 2);
/// let paths: Vec<_> = output.files().map(|(path, _)| path).collect();
/// assert_eq!(paths, vec!["Skill.md", "capabilities/users.get.md"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillOutput {
    /// Index document
    pub skill_md: String,
    /// Shared documents keyed by file name (`auth.md`, `schemas/types.md`)
    pub common: BTreeMap<String, String>,
    /// Capability documents keyed by file name (`<id>.md`)
    pub capabilities: BTreeMap<String, String>,
}

impl SkillOutput {
    /// File name of the index document.
    pub const INDEX_FILE: &'static str = "Skill.md";

    /// Directory holding shared documents.
    pub const COMMON_DIR: &'static str = "common";

    /// Directory holding capability documents.
    pub const CAPABILITIES_DIR: &'static str = "capabilities";

    /// Creates a bundle with only an index document.
    #[must_use]
    pub fn new(skill_md: String) -> Self {
        Self {
            skill_md,
            common: BTreeMap::new(),
            capabilities: BTreeMap::new(),
        }
    }

    /// Returns the number of files in the bundle, index included.
    #[must_use]
    pub fn file_count(&self) -> usize {
        1 + self.common.len() + self.capabilities.len()
    }

    /// Iterates over every file as `(relative path, content)`.
    ///
    /// The index comes first, then shared files, then capabilities.
    pub fn files(&self) -> impl Iterator<Item = (String, &str)> {
        std::iter::once((Self::INDEX_FILE.to_string(), self.skill_md.as_str()))
            .chain(
                self.common
                    .iter()
                    .map(|(name, body)| (format!("{}/{name}", Self::COMMON_DIR), body.as_str())),
            )
            .chain(self.capabilities.iter().map(|(name, body)| {
                (format!("{}/{name}", Self::CAPABILITIES_DIR), body.as_str())
            }))
    }
}

/// A shared document a capability depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Dependency {
    /// `auth`, resolved to `common/auth.md`
    #[serde(rename = "auth")]
    Auth,
    /// `schemas/types`, resolved to `common/schemas/types.md`
    #[serde(rename = "schemas/types")]
    SharedTypes,
}

impl Dependency {
    /// Returns the dependency as listed in the index table.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::SharedTypes => "schemas/types",
        }
    }

    /// Returns the file name under `common/` this dependency resolves to.
    #[must_use]
    pub const fn common_file(&self) -> &'static str {
        match self {
            Self::Auth => "auth.md",
            Self::SharedTypes => "schemas/types.md",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the index document's capability table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityIndexEntry {
    /// Capability id
    pub id: String,
    /// Keywords; only the first five are rendered
    pub intent_keywords: Vec<String>,
    /// `capabilities/<id>.md`
    pub file_path: String,
    /// Shared documents the capability relies on, without duplicates
    pub dependencies: Vec<Dependency>,
}

impl CapabilityIndexEntry {
    /// Creates an entry with the conventional file path for `id`.
    #[must_use]
    pub fn new(id: String, intent_keywords: Vec<String>, dependencies: Vec<Dependency>) -> Self {
        let file_path = format!("{}/{id}.md", SkillOutput::CAPABILITIES_DIR);
        Self {
            id,
            intent_keywords,
            file_path,
            dependencies,
        }
    }
}
