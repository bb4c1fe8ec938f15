//! OpenAPI / Swagger parser.
//!
//! Accepts JSON or YAML text. Only the fields the Skill generator consumes
//! are modeled: `info`, `servers[0].url`, `paths.*.<method>`,
//! `components.schemas`, `components.securitySchemes` and the top-level
//! `security` list. Everything else is ignored.

use crate::resolver::SchemaResolver;
use mapi_core::{
    ApiKeyLocation, AuthDescriptor, Error, HttpMethod, OpenApiResponse, ParsedOpenApiDocument,
    ParsedOpenApiOperation, Result, SchemaTable, SecurityRequirement,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

const DEFAULT_TITLE: &str = "Untitled API";
const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Parses an OpenAPI 3.x or Swagger 2.0 document.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the text is neither JSON nor YAML, and
/// [`Error::InvalidDocument`] if it lacks both `openapi` and `swagger`.
///
/// # Examples
///
/// ```
/// use mapi_parser::parse_openapi_document;
///
/// let doc = parse_openapi_document("openapi: 3.0.0\ninfo:\n  title: Pets\npaths: {}\n")?;
/// assert_eq!(doc.title, "Pets");
/// assert_eq!(doc.version, "1.0.0");
/// assert_eq!(doc.base_url, "https://api.example.com");
///
/// let err = parse_openapi_document("info:\n  title: Pets\n").unwrap_err();
/// assert!(err.is_invalid_document());
/// # Ok::<(), mapi_core::Error>(())
/// ```
pub fn parse_openapi_document(content: &str) -> Result<ParsedOpenApiDocument> {
    let doc = parse_json_or_yaml(content)?;

    let Some(root) = doc.as_object() else {
        return Err(missing_version_field());
    };
    if !is_truthy(root.get("openapi")) && !is_truthy(root.get("swagger")) {
        return Err(missing_version_field());
    }

    let info = root.get("info");
    let title = info
        .and_then(|info| text_field(info, "title"))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = info.and_then(|info| text_field(info, "description"));
    let version = info
        .and_then(|info| text_field(info, "version"))
        .unwrap_or_else(|| DEFAULT_VERSION.to_string());

    let base_url = root
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
        .and_then(|server| text_field(server, "url"))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let components = root.get("components");
    let schemas: SchemaTable = components
        .and_then(|components| components.get("schemas"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let auth = components
        .and_then(|components| components.get("securitySchemes"))
        .and_then(Value::as_object)
        .and_then(extract_auth);

    let operations = extract_operations(root, &schemas);

    debug!(
        title = %title,
        operations = operations.len(),
        schemas = schemas.len(),
        "parsed OpenAPI document"
    );

    Ok(ParsedOpenApiDocument {
        title,
        description,
        version,
        base_url,
        auth,
        operations,
        schemas,
    })
}

/// Turns an `operationId` into a dotted capability id.
///
/// Underscores become dots, a dot is inserted at each lower-to-upper case
/// boundary, and the result is lowercased.
///
/// # Examples
///
/// ```
/// use mapi_parser::normalize_operation_id;
///
/// assert_eq!(normalize_operation_id("createUser"), "create.user");
/// assert_eq!(normalize_operation_id("list_users"), "list.users");
/// assert_eq!(normalize_operation_id("get_users_id_posts"), "get.users.id.posts");
/// assert_eq!(normalize_operation_id("getHTTPStatus"), "get.httpstatus");
/// ```
#[must_use]
pub fn normalize_operation_id(operation_id: &str) -> String {
    let mut normalized = String::with_capacity(operation_id.len() + 4);
    let mut previous: Option<char> = None;

    for ch in operation_id.chars() {
        if ch == '_' {
            normalized.push('.');
        } else {
            if previous.is_some_and(|p| p.is_ascii_lowercase()) && ch.is_ascii_uppercase() {
                normalized.push('.');
            }
            normalized.push(ch);
        }
        previous = Some(ch);
    }

    normalized.to_lowercase()
}

/// Synthesizes an `operationId` as `<method>_<path segments>`.
fn generate_operation_id(method: HttpMethod, path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace(['{', '}'], ""))
        .collect();

    format!("{}_{}", method.as_key(), segments.join("_"))
}

fn missing_version_field() -> Error {
    Error::InvalidDocument {
        reason: "missing openapi or swagger field".to_string(),
    }
}

fn parse_json_or_yaml(content: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        return Ok(value);
    }

    serde_yaml::from_str::<serde_yaml::Value>(content)
        .map(yaml_to_json)
        .map_err(|err| Error::ParseError {
            format: "YAML".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
}

/// Converts YAML into JSON, stringifying non-string mapping keys.
///
/// Response maps are commonly written with bare integer keys (`200:`),
/// which a direct deserialization into JSON would reject.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(flag) => Value::Bool(flag),
        Yaml::Number(number) => {
            if let Some(int) = number.as_i64() {
                Value::from(int)
            } else if let Some(uint) = number.as_u64() {
                Value::from(uint)
            } else {
                number
                    .as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(text) => Value::String(text),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(text) => text,
        serde_yaml::Value::Number(number) => number.to_string(),
        serde_yaml::Value::Bool(flag) => flag.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_json::to_string(&yaml_to_json(other)).unwrap_or_default(),
    }
}

/// Absent, `null`, `false`, `0` and `""` all count as missing.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Reads a scalar field as text; empty strings count as absent.
fn text_field(object: &Value, key: &str) -> Option<String> {
    scalar_text(object.get(key))
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Picks the first security scheme of a supported kind.
fn extract_auth(schemes: &Map<String, Value>) -> Option<AuthDescriptor> {
    schemes.values().find_map(|scheme| {
        let kind = scheme.get("type").and_then(Value::as_str)?;
        match kind {
            "http"
                if scheme
                    .get("scheme")
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.eq_ignore_ascii_case("bearer")) =>
            {
                Some(AuthDescriptor::Bearer {
                    bearer_format: text_field(scheme, "bearerFormat"),
                })
            }
            "apiKey" => Some(AuthDescriptor::ApiKey {
                name: text_field(scheme, "name"),
                location: scheme
                    .get("in")
                    .cloned()
                    .and_then(|location| serde_json::from_value::<ApiKeyLocation>(location).ok()),
            }),
            "oauth2" => Some(AuthDescriptor::OAuth2 {
                flows: scheme
                    .get("flows")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
            }),
            _ => None,
        }
    })
}

fn extract_operations(root: &Map<String, Value>, schemas: &SchemaTable) -> Vec<ParsedOpenApiOperation> {
    let Some(paths) = root.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let resolver = SchemaResolver::new(schemas);
    let document_security = root.get("security");
    let mut operations = Vec::new();

    for (path, item) in paths {
        for method in HttpMethod::ALL {
            let Some(operation) = item.get(method.as_key()).and_then(Value::as_object) else {
                continue;
            };
            operations.push(build_operation(
                method,
                path,
                operation,
                document_security,
                &resolver,
            ));
        }
    }

    operations
}

fn build_operation(
    method: HttpMethod,
    path: &str,
    operation: &Map<String, Value>,
    document_security: Option<&Value>,
    resolver: &SchemaResolver<'_>,
) -> ParsedOpenApiOperation {
    let operation_id = scalar_text(operation.get("operationId"))
        .unwrap_or_else(|| generate_operation_id(method, path));

    let parameters = operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|param| resolver.resolve_parameter(param))
                .collect()
        })
        .unwrap_or_default();

    let request_body = operation
        .get("requestBody")
        .filter(|body| body.is_object())
        .and_then(|body| resolver.resolve_request_body(body));

    let responses = operation
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(status, response)| {
                    let parsed = serde_json::from_value::<OpenApiResponse>(response.clone())
                        .unwrap_or_default();
                    (status.clone(), parsed)
                })
                .collect::<BTreeMap<_, _>>()
        })
        .unwrap_or_default();

    let security = operation
        .get("security")
        .filter(|security| security.is_array())
        .or(document_security)
        .and_then(Value::as_array)
        .map(|requirements| {
            requirements
                .iter()
                .filter_map(|requirement| {
                    serde_json::from_value::<SecurityRequirement>(requirement.clone()).ok()
                })
                .collect()
        })
        .unwrap_or_default();

    let tags = operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ParsedOpenApiOperation {
        operation_id,
        method,
        path: path.to_string(),
        summary: scalar_text(operation.get("summary")),
        description: scalar_text(operation.get("description")),
        parameters,
        request_body,
        responses,
        security,
        tags,
        deprecated: operation
            .get("deprecated")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}
