//! Shallow `$ref` resolution against `components.schemas`.
//!
//! Only the `#/components/schemas/<Name>` shape is understood. Any other
//! reference, or a name missing from the table, resolves to
//! `{"type": "object"}`. Resolution is one level deep: references nested
//! inside a resolved schema are left for the type renderer, which prints
//! them by name.

use mapi_core::{OpenApiParameter, OpenApiRequestBody, Schema, SchemaTable};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;
use tracing::debug;

static SCHEMA_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#/components/schemas/(\w+)").expect("valid regex"));

/// Resolves references against a document's named component schemas.
///
/// # Examples
///
/// ```
/// use mapi_parser::SchemaResolver;
/// use serde_json::json;
///
/// let schemas = json!({"User": {"type": "object", "properties": {"id": {"type": "string"}}}});
/// let resolver = SchemaResolver::new(schemas.as_object().unwrap());
///
/// assert_eq!(resolver.resolve_ref("#/components/schemas/User"), schemas["User"]);
/// assert_eq!(resolver.resolve_ref("#/components/parameters/Limit"), json!({"type": "object"}));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'a> {
    schemas: &'a SchemaTable,
}

impl<'a> SchemaResolver<'a> {
    /// Creates a resolver over the given schema table.
    #[must_use]
    pub const fn new(schemas: &'a SchemaTable) -> Self {
        Self { schemas }
    }

    /// Resolves one reference string.
    #[must_use]
    pub fn resolve_ref(&self, reference: &str) -> Schema {
        SCHEMA_REF_REGEX
            .captures(reference)
            .and_then(|captures| captures.get(1))
            .and_then(|name| self.schemas.get(name.as_str()))
            .cloned()
            .unwrap_or_else(|| {
                debug!(reference, "unresolved reference, using empty object schema");
                json!({"type": "object"})
            })
    }

    /// Resolves a raw parameter object.
    ///
    /// A `$ref` parameter is replaced by the referenced object with the
    /// local sibling keys laid over it. Returns `None` when the result is
    /// not a usable parameter (no `name` or `in`).
    #[must_use]
    pub fn resolve_parameter(&self, raw: &Value) -> Option<OpenApiParameter> {
        let merged = match raw.get("$ref").and_then(Value::as_str) {
            Some(reference) => {
                let mut resolved = self.resolve_ref(reference);
                if let (Some(target), Some(local)) = (resolved.as_object_mut(), raw.as_object()) {
                    for (key, value) in local {
                        target.insert(key.clone(), value.clone());
                    }
                }
                resolved
            }
            None => raw.clone(),
        };

        match serde_json::from_value(merged) {
            Ok(parameter) => Some(parameter),
            Err(err) => {
                debug!(error = %err, "skipping unusable parameter");
                None
            }
        }
    }

    /// Resolves a raw request body object.
    ///
    /// Each media type whose schema is a `$ref` gets the referenced schema
    /// substituted in place.
    #[must_use]
    pub fn resolve_request_body(&self, raw: &Value) -> Option<OpenApiRequestBody> {
        let mut body: OpenApiRequestBody = match serde_json::from_value(raw.clone()) {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "skipping unusable request body");
                return None;
            }
        };

        for media in body.content.values_mut() {
            let reference = media
                .schema
                .as_ref()
                .and_then(|schema| schema.get("$ref"))
                .and_then(Value::as_str)
                .map(str::to_string);
            if let Some(reference) = reference {
                media.schema = Some(self.resolve_ref(&reference));
            }
        }

        Some(body)
    }
}
