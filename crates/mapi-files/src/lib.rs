//! In-memory Skill bundle filesystem and disk export.
//!
//! A [`SkillOutput`](mapi_core::SkillOutput) is laid out as
//! `Skill.md`, `common/<path>` and `capabilities/<path>`. Paths are
//! validated on insertion so an export can never write outside its
//! target directory.
//!
//! # Examples
//!
//! ```
//! use mapi_core::SkillOutput;
//! use mapi_files::FilesBuilder;
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! let mut output = SkillOutput::new("# Demo\n".to_string());
//! output.capabilities.insert("ping.md".to_string(), "# Capability: Ping\n".to_string());
//!
//! FilesBuilder::from_skill_output(&output)
//!     .build_and_export(temp.path())
//!     .unwrap();
//!
//! assert!(temp.path().join("Skill.md").exists());
//! assert!(temp.path().join("capabilities/ping.md").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod builder;
mod error;
mod export;
mod filesystem;
mod path;

pub use builder::FilesBuilder;
pub use error::{FilesError, Result};
pub use export::ExportOptions;
pub use filesystem::BundleFiles;
pub use path::BundlePath;
