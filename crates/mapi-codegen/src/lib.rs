//! Skill generation for MAPI and OpenAPI documents.
//!
//! Renders parsed documents into a Skill bundle using Handlebars
//! templates, and converts JSON Schemas into TypeScript for the shared
//! types and the per-operation input and output sections.
//!
//! # Examples
//!
//! ```
//! use mapi_codegen::{ConvertOptions, convert_to_skill};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let source = "# Foo API\n\n~~~meta\nauth: bearer\n~~~\n\n\
//!     ### Capability: Create Widget\n~~~meta\nid: widgets.create\ntransport: HTTP POST /widgets\n~~~\n\
//!     #### Intention\nCreates a widget.\n";
//!
//! let output = convert_to_skill(source, &ConvertOptions::default()).await.unwrap();
//! assert!(output.common.contains_key("auth.md"));
//! assert!(output.capabilities["widgets.create.md"].contains("## Intention\n\nCreates a widget."));
//! # });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod convert;
pub mod skill;
pub mod template_engine;
pub mod typescript;

pub use convert::{convert_mapi_to_skill, convert_openapi_to_skill, convert_to_skill};
pub use skill::{ConvertOptions, SkillGenerator};
