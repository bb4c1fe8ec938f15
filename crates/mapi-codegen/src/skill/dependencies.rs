//! Dependency inference for capability index entries.
//!
//! Both rules are textual heuristics. The MAPI shared-types rule matches
//! declared type names as substrings of the capability source, and the
//! OpenAPI rule links every operation to the shared types whenever the
//! document declares any component schema.

use mapi_core::{
    AuthMode, AuthRequirement, Dependency, ParsedCapability, ParsedMapiDocument, ParsedOpenApiDocument,
    ParsedOpenApiOperation,
};
use regex::Regex;
use std::sync::LazyLock;

static TYPE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"interface\s+(\w+)|type\s+(\w+)").expect("valid regex"));

/// Names declared with `interface X` or `type X` in a TypeScript source.
#[must_use]
pub fn declared_type_names(source: &str) -> Vec<&str> {
    TYPE_NAME_REGEX
        .captures_iter(source)
        .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
        .map(|name| name.as_str())
        .collect()
}

/// Dependencies of a MAPI capability.
#[must_use]
pub fn for_mapi(capability: &ParsedCapability, document: &ParsedMapiDocument) -> Vec<Dependency> {
    let mut dependencies = Vec::new();

    let needs_auth = match &capability.meta.auth {
        Some(requirement) => *requirement == AuthRequirement::Required,
        None => document.meta.auth.as_ref().is_none_or(AuthMode::is_enabled),
    };
    if needs_auth {
        push_unique(&mut dependencies, Dependency::Auth);
    }

    if let Some(global_types) = &document.global_types
        && declared_type_names(global_types)
            .iter()
            .any(|name| capability.raw_content.contains(name))
    {
        push_unique(&mut dependencies, Dependency::SharedTypes);
    }

    dependencies
}

/// Dependencies of an OpenAPI operation.
#[must_use]
pub fn for_openapi(
    operation: &ParsedOpenApiOperation,
    document: &ParsedOpenApiDocument,
) -> Vec<Dependency> {
    let mut dependencies = Vec::new();
    if !operation.security.is_empty() {
        push_unique(&mut dependencies, Dependency::Auth);
    }
    if !document.schemas.is_empty() {
        push_unique(&mut dependencies, Dependency::SharedTypes);
    }
    dependencies
}

fn push_unique(dependencies: &mut Vec<Dependency>, dependency: Dependency) {
    if !dependencies.contains(&dependency) {
        dependencies.push(dependency);
    }
}
