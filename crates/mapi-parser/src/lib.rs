//! Parsers for MAPI markdown and OpenAPI documents.
//!
//! Both parsers reduce their input to the intermediate representation in
//! [`mapi_core`]:
//!
//! - [`parse_mapi_document`] never fails; malformed pieces degrade to
//!   defaults and capabilities without `id`/`transport` are dropped
//! - [`parse_openapi_document`] fails only when the text is not JSON/YAML
//!   or declares neither `openapi` nor `swagger`
//!
//! The crate also holds the fallback intent keyword heuristics used when no
//! keyword collaborator is configured.
//!
//! # Examples
//!
//! ```
//! use mapi_parser::{parse_mapi_document, parse_openapi_document};
//!
//! let mapi = parse_mapi_document("# Notes API\n");
//! assert_eq!(mapi.title, "Notes API");
//!
//! let openapi = parse_openapi_document(r#"{"openapi": "3.0.0", "info": {"title": "Notes"}}"#)?;
//! assert_eq!(openapi.title, "Notes");
//! # Ok::<(), mapi_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod keywords;
mod mapi;
mod meta;
mod openapi;
mod resolver;

pub use keywords::{ACTION_VERBS, extract_intent_keywords, extract_openapi_intent_keywords};
pub use mapi::parse_mapi_document;
pub use meta::{capability_meta, document_meta, read_meta_fields};
pub use openapi::{normalize_operation_id, parse_openapi_document};
pub use resolver::SchemaResolver;
