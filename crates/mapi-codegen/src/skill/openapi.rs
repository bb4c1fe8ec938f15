//! Capability and shared-type documents for OpenAPI operations.

use super::context::{CapabilityContext, Section};
use crate::typescript::{is_object_schema, object_fields, schema_to_typescript, to_pascal_case};
use mapi_core::{OpenApiParameter, ParsedOpenApiOperation, Schema, SchemaTable};

/// Response codes checked for the output section, in priority order.
const SUCCESS_CODES: [&str; 3] = ["200", "201", "204"];

const JSON_MEDIA_TYPE: &str = "application/json";

/// Builds the document context for one operation.
#[must_use]
pub fn operation_context(operation: &ParsedOpenApiOperation, capability_id: &str) -> CapabilityContext {
    let mut meta = vec![
        format!("id: {capability_id}"),
        format!(
            "transport: HTTP {} {}",
            operation.method.as_str(),
            operation.path
        ),
    ];
    if !operation.security.is_empty() {
        meta.push("auth: required".to_string());
    }
    if operation.deprecated {
        meta.push("deprecated: true".to_string());
    }

    let intention = operation
        .description
        .clone()
        .or_else(|| operation.summary.clone())
        .unwrap_or_else(|| format!("Performs {} operation.", operation.operation_id));

    let type_name = to_pascal_case(&operation.operation_id);
    let input = input_interface(operation, &type_name);
    let output = output_type(operation, &type_name);

    let sections = [
        Section::prose("Intention", Some(intention.as_str())),
        Section::typescript("Input", input.as_deref()),
        Section::typescript("Output", output.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    CapabilityContext {
        heading: format!(
            "Capability: {}",
            operation.summary.as_deref().unwrap_or(&operation.operation_id)
        ),
        meta,
        sections,
    }
}

/// Renders every component schema, in declaration order.
///
/// Object schemas become interfaces, everything else a type alias.
#[must_use]
pub fn types_source(schemas: &SchemaTable) -> String {
    schemas
        .iter()
        .map(|(name, schema)| named_type(schema, name))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn named_type(schema: &Schema, name: &str) -> String {
    if is_object_schema(schema) {
        schema_to_typescript(schema, name, "")
    } else {
        format!("type {name} = {};", schema_to_typescript(schema, "", ""))
    }
}

fn input_interface(operation: &ParsedOpenApiOperation, type_name: &str) -> Option<String> {
    if operation.parameters.is_empty() && operation.request_body.is_none() {
        return None;
    }

    let mut members: Vec<String> = operation.parameters.iter().map(parameter_member).collect();

    let body_schema = operation
        .request_body
        .as_ref()
        .and_then(|body| body.content.get(JSON_MEDIA_TYPE))
        .and_then(|media| media.schema.as_ref());
    if let Some(schema) = body_schema {
        if is_object_schema(schema) {
            members.extend(object_fields(schema, ""));
        } else {
            members.push(format!("  body: {};", schema_to_typescript(schema, "", "  ")));
        }
    }

    let mut source = format!("interface {type_name}Request {{\n");
    for member in members {
        source.push_str(&member);
        source.push('\n');
    }
    source.push('}');
    Some(source)
}

fn parameter_member(parameter: &OpenApiParameter) -> String {
    let optional = if parameter.required { "" } else { "?" };
    let ts = parameter
        .schema
        .as_ref()
        .map_or_else(|| "string".to_string(), |schema| schema_to_typescript(schema, "", "  "));
    let location = parameter.location.as_str();
    let comment = parameter.description.as_deref().map_or_else(
        || format!("in: {location}"),
        |description| format!("{} (in: {location})", description.trim()),
    );
    format!("  {}{optional}: {ts};  // {comment}", parameter.name)
}

fn output_type(operation: &ParsedOpenApiOperation, type_name: &str) -> Option<String> {
    let response = SUCCESS_CODES
        .iter()
        .find_map(|code| operation.responses.get(*code))?;
    let name = format!("{type_name}Response");

    let schema = response
        .content
        .get(JSON_MEDIA_TYPE)
        .and_then(|media| media.schema.as_ref());
    Some(schema.map_or_else(
        || {
            format!(
                "interface {name} {{\n  // {}\n}}",
                response.description.as_deref().unwrap_or("Success")
            )
        },
        |schema| named_type(schema, &name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapi_core::{
        HttpMethod, MediaType, OpenApiRequestBody, OpenApiResponse, ParameterLocation,
    };
    use serde_json::json;
    use std::collections::BTreeMap;

    fn operation() -> ParsedOpenApiOperation {
        ParsedOpenApiOperation {
            operation_id: "createUser".to_string(),
            method: HttpMethod::Post,
            path: "/orgs/{org}/users".to_string(),
            summary: Some("Create a user".to_string()),
            description: None,
            parameters: vec![OpenApiParameter {
                name: "org".to_string(),
                location: ParameterLocation::Path,
                required: true,
                description: None,
                schema: Some(json!({"type": "string"})),
            }],
            request_body: Some(OpenApiRequestBody {
                description: None,
                required: true,
                content: BTreeMap::from([(
                    "application/json".to_string(),
                    MediaType {
                        schema: Some(json!({
                            "type": "object",
                            "properties": {"email": {"type": "string"}},
                            "required": ["email"]
                        })),
                    },
                )]),
            }),
            responses: BTreeMap::from([
                (
                    "201".to_string(),
                    OpenApiResponse {
                        description: Some("Created".to_string()),
                        content: BTreeMap::new(),
                    },
                ),
                (
                    "400".to_string(),
                    OpenApiResponse {
                        description: Some("Bad request".to_string()),
                        content: BTreeMap::new(),
                    },
                ),
            ]),
            security: Vec::new(),
            tags: Vec::new(),
            deprecated: true,
        }
    }

    #[test]
    fn test_heading_and_meta() {
        let context = operation_context(&operation(), "create.user");
        assert_eq!(context.heading, "Capability: Create a user");
        assert_eq!(
            context.meta,
            vec![
                "id: create.user",
                "transport: HTTP POST /orgs/{org}/users",
                "deprecated: true"
            ]
        );
    }

    #[test]
    fn test_input_inlines_body_fields() {
        let context = operation_context(&operation(), "create.user");
        assert_eq!(context.sections[1].title, "Input");
        assert_eq!(
            context.sections[1].body,
            "```typescript\ninterface CreateUserRequest {\n  org: string;  // in: path\n  email: string;\n}\n```"
        );
    }

    #[test]
    fn test_non_object_body_is_a_member() {
        let mut op = operation();
        op.parameters.clear();
        op.request_body = Some(OpenApiRequestBody {
            description: None,
            required: false,
            content: BTreeMap::from([(
                "application/json".to_string(),
                MediaType {
                    schema: Some(json!({"type": "array", "items": {"$ref": "#/components/schemas/User"}})),
                },
            )]),
        });

        let input = input_interface(&op, "CreateUser").unwrap();
        assert_eq!(input, "interface CreateUserRequest {\n  body: User[];\n}");
    }

    #[test]
    fn test_parameter_comment_keeps_location() {
        let parameter = OpenApiParameter {
            name: "limit".to_string(),
            location: ParameterLocation::Query,
            required: false,
            description: Some("Page size".to_string()),
            schema: None,
        };
        assert_eq!(
            parameter_member(&parameter),
            "  limit?: string;  // Page size (in: query)"
        );
    }

    #[test]
    fn test_output_without_schema_uses_description() {
        let output = output_type(&operation(), "CreateUser").unwrap();
        assert_eq!(output, "interface CreateUserResponse {\n  // Created\n}");
    }

    #[test]
    fn test_output_prefers_200() {
        let mut op = operation();
        op.responses.insert(
            "200".to_string(),
            OpenApiResponse {
                description: None,
                content: BTreeMap::from([(
                    "application/json".to_string(),
                    MediaType {
                        schema: Some(json!({"$ref": "#/components/schemas/Users"})),
                    },
                )]),
            },
        );
        assert_eq!(
            output_type(&op, "CreateUser").unwrap(),
            "type CreateUserResponse = Users;"
        );
    }

    #[test]
    fn test_no_input_and_no_output() {
        let mut op = operation();
        op.parameters.clear();
        op.request_body = None;
        op.responses.clear();
        op.summary = None;

        let context = operation_context(&op, "create.user");
        assert_eq!(context.heading, "Capability: createUser");
        assert_eq!(context.sections.len(), 1);
        assert_eq!(context.sections[0].body, "Performs createUser operation.");
    }

    #[test]
    fn test_types_source() {
        let schemas = json!({
            "User": {"type": "object", "properties": {"id": {"type": "string"}}},
            "Status": {"type": "string", "enum": ["active", "banned"]}
        });
        assert_eq!(
            types_source(schemas.as_object().unwrap()),
            "interface User {\n  id?: string;\n}\n\ntype Status = \"active\" | \"banned\";"
        );
    }
}
