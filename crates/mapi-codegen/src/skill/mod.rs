//! Skill bundle generation.
//!
//! A bundle is an index document (`Skill.md`), shared documents under
//! `common/` and one document per capability under `capabilities/`.
//! Both source formats render through the same templates, so the index
//! layout does not depend on the input format.

mod auth;
mod context;
mod dependencies;
mod generator;
mod mapi;
mod openapi;

pub use context::INDEX_KEYWORD_LIMIT;
pub use generator::{ConvertOptions, SkillGenerator};
