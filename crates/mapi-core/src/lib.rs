//! Core types, traits, and errors for MAPI Skill conversion.
//!
//! This crate provides the foundational types shared by the parsers and
//! the Skill generator.
//!
//! # Architecture
//!
//! The core consists of:
//! - Intermediate representation produced by the MAPI and OpenAPI parsers
//! - The in-memory [`SkillOutput`] bundle produced by the generator
//! - The [`IntentGenerator`] port for optional keyword enrichment
//! - Format detection shared by the CLI and the auto-detecting converter
//! - Error hierarchy with contextual information

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod format;
mod output;
mod types;

pub mod cli;
pub mod traits;

pub use error::{Error, Result};
pub use format::SpecFormat;
pub use output::{CapabilityIndexEntry, Dependency, SkillOutput};
pub use traits::IntentGenerator;
pub use types::{
    ApiKeyLocation, AuthDescriptor, AuthMode, AuthRequirement, CapabilityKind, HttpMethod,
    MapiCapabilityMeta, MapiDocumentMeta, MediaType, MetaValue, OpenApiParameter,
    OpenApiRequestBody, OpenApiResponse, ParameterLocation, ParsedCapability,
    ParsedMapiDocument, ParsedOpenApiDocument, ParsedOpenApiOperation, Schema, SchemaTable,
    SecurityRequirement,
};
