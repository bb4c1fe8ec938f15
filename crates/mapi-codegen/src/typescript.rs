//! JSON Schema to TypeScript rendering.
//!
//! Shared by the shared-types document and the per-operation input and
//! output sections. References are printed by name and never followed,
//! so rendering terminates on any finite schema value. Nesting deeper
//! than [`MAX_DEPTH`] renders as `unknown`.
//!
//! # Examples
//!
//! ```
//! use mapi_codegen::typescript::schema_to_typescript;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"name": {"type": "string"}},
//!     "required": ["name"]
//! });
//!
//! let ts = schema_to_typescript(&schema, "User", "");
//! assert_eq!(ts, "interface User {\n  name: string;\n}");
//! ```

use serde_json::{Map, Value};

/// Maximum nesting depth rendered before falling back to `unknown`.
pub const MAX_DEPTH: usize = 32;

/// Converts a name to PascalCase for TypeScript type names.
///
/// Splits on `_`, `.`, `-` and whitespace and uppercases the first
/// character of each part. The rest of each part is kept as written, so
/// existing camelCase boundaries survive.
///
/// # Examples
///
/// ```
/// use mapi_codegen::typescript::to_pascal_case;
///
/// assert_eq!(to_pascal_case("listPets"), "ListPets");
/// assert_eq!(to_pascal_case("get_users_id_posts"), "GetUsersIdPosts");
/// assert_eq!(to_pascal_case("orders.create"), "OrdersCreate");
/// ```
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '.' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect()
}

/// Renders a schema as TypeScript source.
///
/// With a non-empty `name`, an object schema renders as a named
/// `interface` declaration. With an empty name it renders as an inline
/// object literal type. `indent` is the indentation of the line the
/// result starts on; nested members are indented two spaces further.
///
/// # Examples
///
/// ```
/// use mapi_codegen::typescript::schema_to_typescript;
/// use serde_json::json;
///
/// assert_eq!(schema_to_typescript(&json!({"$ref": "#/components/schemas/Pet"}), "", ""), "Pet");
/// assert_eq!(schema_to_typescript(&json!({"type": "array", "items": {"type": "integer"}}), "", ""), "number[]");
/// assert_eq!(
///     schema_to_typescript(&json!({"type": "string", "enum": ["on", "off"]}), "", ""),
///     r#""on" | "off""#
/// );
/// ```
#[must_use]
pub fn schema_to_typescript(schema: &Value, name: &str, indent: &str) -> String {
    render(schema, Some(name).filter(|n| !n.is_empty()), indent, 0)
}

/// Returns `true` when the schema renders as an object type.
#[must_use]
pub fn is_object_schema(schema: &Value) -> bool {
    schema.get("$ref").is_none()
        && (primary_type(schema) == Some("object") || schema.get("properties").is_some())
        && primary_type(schema) != Some("array")
}

/// Renders the member lines of an object schema.
///
/// Used to inline a request body's top-level properties into another
/// interface. Each line starts with `indent` plus two spaces.
///
/// # Examples
///
/// ```
/// use mapi_codegen::typescript::object_fields;
/// use serde_json::json;
///
/// let schema = json!({
///     "type": "object",
///     "properties": {"id": {"type": "integer", "description": "Row id"}},
/// });
/// assert_eq!(object_fields(&schema, ""), vec!["  id?: number;  // Row id"]);
/// ```
#[must_use]
pub fn object_fields(schema: &Value, indent: &str) -> Vec<String> {
    schema
        .as_object()
        .map(|object| fields(object, indent, 0))
        .unwrap_or_default()
}

fn render(schema: &Value, name: Option<&str>, indent: &str, depth: usize) -> String {
    if depth > MAX_DEPTH {
        return "unknown".to_string();
    }
    let Some(object) = schema.as_object() else {
        return "unknown".to_string();
    };

    if let Some(reference) = object.get("$ref") {
        return reference
            .as_str()
            .and_then(|r| r.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("Unknown")
            .to_string();
    }

    let schema_type = primary_type(schema);

    if schema_type == Some("array") {
        return object.get("items").map_or_else(
            || "unknown".to_string(),
            |items| {
                let item = render(items, None, indent, depth + 1);
                if item.contains(" | ") {
                    format!("({item})[]")
                } else {
                    format!("{item}[]")
                }
            },
        );
    }

    if schema_type == Some("object") || object.contains_key("properties") {
        let members = fields(object, indent, depth);
        return match name {
            Some(name) if members.is_empty() => format!("interface {name} {{\n{indent}}}"),
            Some(name) => format!("interface {name} {{\n{}\n{indent}}}", members.join("\n")),
            None if members.is_empty() => "Record<string, unknown>".to_string(),
            None => format!("{{\n{}\n{indent}}}", members.join("\n")),
        };
    }

    match schema_type {
        Some("string") => object
            .get("enum")
            .and_then(Value::as_array)
            .filter(|values| !values.is_empty())
            .map_or_else(
                || "string".to_string(),
                |values| {
                    values
                        .iter()
                        .map(|value| match value {
                            Value::String(s) => format!("\"{s}\""),
                            other => format!("\"{other}\""),
                        })
                        .collect::<Vec<_>>()
                        .join(" | ")
                },
            ),
        Some("integer" | "number") => "number".to_string(),
        Some("boolean") => "boolean".to_string(),
        _ => "unknown".to_string(),
    }
}

fn fields(object: &Map<String, Value>, indent: &str, depth: usize) -> Vec<String> {
    let Some(properties) = object.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };
    let required: Vec<&str> = object
        .get("required")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let member_indent = format!("{indent}  ");

    properties
        .iter()
        .map(|(key, property)| {
            let optional = if required.contains(&key.as_str()) { "" } else { "?" };
            let ts = render(property, None, &member_indent, depth + 1);
            let comment = property
                .get("description")
                .and_then(Value::as_str)
                .map(|d| format!("  // {}", single_line(d)))
                .unwrap_or_default();
            format!("{member_indent}{}{optional}: {ts};{comment}", property_key(key))
        })
        .collect()
}

/// Reads `type`, taking the first non-null entry of a type array.
fn primary_type(schema: &Value) -> Option<&str> {
    match schema.get("type")? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        key.to_string()
    } else {
        format!("\"{key}\"")
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
