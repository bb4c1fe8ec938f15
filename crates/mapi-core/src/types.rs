//! Intermediate representation shared by parsers and generators.
//!
//! Both parsers reduce loosely structured input to the value types in this
//! module. All of them are plain immutable data: constructed once per
//! conversion call, consumed by the generator, then dropped.
//!
//! # Examples
//!
//! ```
//! use mapi_core::{AuthMode, CapabilityKind, MetaValue};
//!
//! assert_eq!(CapabilityKind::from_label("Webhook"), Some(CapabilityKind::Webhook));
//! assert_eq!(AuthMode::from_value(&MetaValue::parse("bearer")), AuthMode::Bearer);
//! assert_eq!(MetaValue::parse("[read, write]"), MetaValue::List(vec![
//!     "read".to_string(),
//!     "write".to_string(),
//! ]));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A JSON-Schema-like schema object, kept as raw JSON.
///
/// Schemas are rendered best-effort and never validated, so they are not
/// modeled as a closed type.
pub type Schema = serde_json::Value;

/// Named component schemas in declaration order.
///
/// Doubles as the `$ref` resolution table.
pub type SchemaTable = serde_json::Map<String, serde_json::Value>;

/// One OpenAPI security requirement object (scheme name to scopes).
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

// ============================================================================
// Metadata values
// ============================================================================

/// A value read from a `~~~meta` block.
///
/// Raw `key: value` text is coerced in this order: boolean literals,
/// bracketed lists, all-digit integers, then trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// `true` or `false`
    Bool(bool),
    /// An all-digit value
    Integer(i64),
    /// `[a, b]` with surrounding quotes stripped from each item
    List(Vec<String>),
    /// Anything else, trimmed
    Text(String),
}

impl MetaValue {
    /// Coerces a raw metadata value.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapi_core::MetaValue;
    ///
    /// assert_eq!(MetaValue::parse("true"), MetaValue::Bool(true));
    /// assert_eq!(MetaValue::parse("42"), MetaValue::Integer(42));
    /// assert_eq!(MetaValue::parse(" HTTP GET /users "), MetaValue::Text("HTTP GET /users".to_string()));
    /// assert_eq!(
    ///     MetaValue::parse(r#"["a", 'b']"#),
    ///     MetaValue::List(vec!["a".to_string(), "b".to_string()])
    /// );
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim();

        match value {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }

        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let items = inner
                .split(',')
                .map(|item| strip_quotes(item.trim()).to_string())
                .collect();
            return Self::List(items);
        }

        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = value.parse::<i64>() {
                return Self::Integer(number);
            }
        }

        Self::Text(value.to_string())
    }

    /// Returns the boolean payload, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Converts the value into a list of strings.
    ///
    /// A scalar becomes a one-element list.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Integer(number) => write!(f, "{number}"),
            Self::List(items) => f.write_str(&items.join(",")),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn strip_quotes(item: &str) -> &str {
    let item = item
        .strip_prefix('"')
        .or_else(|| item.strip_prefix('\''))
        .unwrap_or(item);
    item.strip_suffix('"')
        .or_else(|| item.strip_suffix('\''))
        .unwrap_or(item)
}

// ============================================================================
// Auth markers
// ============================================================================

/// Document-level authentication mode declared in MAPI metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum AuthMode {
    /// `none`
    None,
    /// `bearer`
    Bearer,
    /// `api_key`
    ApiKey,
    /// `oauth2`
    OAuth2,
    /// Any other declared mode, kept verbatim
    Other(String),
}

impl AuthMode {
    /// Reads an auth mode from a metadata value.
    #[must_use]
    pub fn from_value(value: &MetaValue) -> Self {
        if value == &MetaValue::Bool(false) {
            return Self::None;
        }
        match value.to_string().as_str() {
            "none" => Self::None,
            "bearer" => Self::Bearer,
            "api_key" => Self::ApiKey,
            "oauth2" => Self::OAuth2,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the mode as written in metadata.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Bearer => "bearer",
            Self::ApiKey => "api_key",
            Self::OAuth2 => "oauth2",
            Self::Other(other) => other,
        }
    }

    /// Returns `true` unless the mode is `none`.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AuthMode> for String {
    fn from(mode: AuthMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Capability-level auth requirement marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum AuthRequirement {
    /// `required` (or `true`)
    Required,
    /// `optional`
    Optional,
    /// `none`
    None,
    /// Any other marker, kept verbatim; only `required` implies auth
    Other(String),
}

impl AuthRequirement {
    /// Reads a requirement marker from a metadata value.
    #[must_use]
    pub fn from_value(value: &MetaValue) -> Self {
        match value.to_string().as_str() {
            "required" => Self::Required,
            "optional" => Self::Optional,
            "none" => Self::None,
            text => Self::Other(text.to_string()),
        }
    }

    /// Returns the marker as written in metadata.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::None => "none",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for AuthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AuthRequirement> for String {
    fn from(requirement: AuthRequirement) -> Self {
        requirement.as_str().to_string()
    }
}

// ============================================================================
// MAPI IR
// ============================================================================

/// The four capability kinds a MAPI document can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CapabilityKind {
    /// `## Capability: <Name>`
    Capability,
    /// `## Channel: <Name>`
    Channel,
    /// `## Webhook: <Name>`
    Webhook,
    /// `## Tool: <Name>`
    Tool,
}

impl CapabilityKind {
    /// All kinds in the order they are listed in the MAPI grammar.
    pub const ALL: [Self; 4] = [Self::Capability, Self::Channel, Self::Webhook, Self::Tool];

    /// Parses the heading label (`Capability`, `Channel`, `Webhook`, `Tool`).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Returns the heading label for this kind.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Capability => "Capability",
            Self::Channel => "Channel",
            Self::Webhook => "Webhook",
            Self::Tool => "Tool",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Document-level metadata from a MAPI file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapiDocumentMeta {
    /// API version
    pub version: Option<String>,
    /// Base URL for HTTP transports
    pub base_url: Option<String>,
    /// Authentication mode
    pub auth: Option<AuthMode>,
    /// Header carrying the API key (`api_key` mode)
    pub auth_header: Option<String>,
    /// OAuth flow name (`oauth2` mode)
    pub auth_flow: Option<String>,
    /// Default OAuth scopes (`oauth2` mode)
    pub auth_scopes: Option<Vec<String>>,
    /// Link to external auth documentation
    pub auth_docs_url: Option<String>,
    /// Default content type
    pub content_type: Option<String>,
    /// Free-form error conventions
    pub errors: Option<String>,
    /// Keys not recognized above
    pub extensions: BTreeMap<String, MetaValue>,
}

/// Capability-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapiCapabilityMeta {
    /// Dotted capability id, stable join key across the bundle
    pub id: String,
    /// Protocol-level invocation (e.g. `HTTP POST /widgets`)
    pub transport: String,
    /// Capability-level auth marker; `None` means inherit the document mode
    pub auth: Option<AuthRequirement>,
    /// OAuth flow override
    pub auth_flow: Option<String>,
    /// OAuth scopes required by this capability
    pub auth_scopes: Option<Vec<String>>,
    /// Whether repeating the call is safe
    pub idempotent: Option<bool>,
    /// Whether the capability is deprecated
    pub deprecated: Option<bool>,
    /// Content type override
    pub content_type: Option<String>,
    /// Keys not recognized above
    pub extensions: BTreeMap<String, MetaValue>,
}

/// A parsed MAPI capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCapability {
    /// Which heading kind introduced the capability
    pub kind: CapabilityKind,
    /// Name from the heading
    pub name: String,
    /// Parsed `~~~meta` block
    pub meta: MapiCapabilityMeta,
    /// `### Intention`
    pub intention: Option<String>,
    /// `### Auth Intention`
    pub auth_intention: Option<String>,
    /// `### Logic Constraints`
    pub logic_constraints: Option<String>,
    /// Body of the code block in `### Input`
    pub input: Option<String>,
    /// Body of the code block in `### Output`
    pub output: Option<String>,
    /// `### Errors`
    pub errors: Option<String>,
    /// `### Example`
    pub example: Option<String>,
    /// Source text from the heading to the next capability heading
    pub raw_content: String,
}

/// A fully parsed MAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMapiDocument {
    /// First level-1 heading, or `Untitled API`
    pub title: String,
    /// Text between the title and the first meta block or level-2 heading
    pub description: Option<String>,
    /// First meta block before any capability heading
    pub meta: MapiDocumentMeta,
    /// Code blocks of the `## Global Types` section, joined by blank lines
    pub global_types: Option<String>,
    /// Accepted capabilities in source order
    pub capabilities: Vec<ParsedCapability>,
}

// ============================================================================
// OpenAPI IR
// ============================================================================

/// The seven HTTP methods an OpenAPI path item can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Methods in the order operations are extracted from a path item.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Returns the lowercase key used in path items.
    #[must_use]
    pub const fn as_key(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Returns the uppercase method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Path template segment
    Path,
    /// Query string
    Query,
    /// Request header
    Header,
    /// Cookie
    Cookie,
    /// Swagger 2.0 body parameter
    Body,
    /// Swagger 2.0 form field
    FormData,
}

impl ParameterLocation {
    /// Returns the location as written in the `in` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::Body => "body",
            Self::FormData => "formData",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiParameter {
    /// Parameter name
    pub name: String,
    /// Parameter location (`in`)
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied
    #[serde(default)]
    pub required: bool,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Parameter schema
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Schema wrapper for one media type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Body schema for this media type
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// A resolved request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiRequestBody {
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the body is required
    #[serde(default)]
    pub required: bool,
    /// Media type to schema mapping
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// One entry of an operation's response map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiResponse {
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Media type to schema mapping
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// Where an API key is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// Request header
    Header,
    /// Query string
    Query,
    /// Cookie
    Cookie,
}

/// The single auth scheme an OpenAPI document is summarized by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDescriptor {
    /// `http` scheme with `bearer`
    Bearer {
        /// Optional token format hint (e.g. `JWT`)
        bearer_format: Option<String>,
    },
    /// `apiKey` scheme
    ApiKey {
        /// Header, query, or cookie name carrying the key
        name: Option<String>,
        /// Where the key is carried
        location: Option<ApiKeyLocation>,
    },
    /// `oauth2` scheme
    #[serde(rename = "oauth2")]
    OAuth2 {
        /// Raw flow objects keyed by flow name, in declaration order
        flows: serde_json::Map<String, serde_json::Value>,
    },
}

impl AuthDescriptor {
    /// Returns the auth kind as shown in the index metadata block.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bearer { .. } => "bearer",
            Self::ApiKey { .. } => "api_key",
            Self::OAuth2 { .. } => "oauth2",
        }
    }
}

/// A resolved OpenAPI operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedOpenApiOperation {
    /// Source `operationId`, or one synthesized from method and path
    pub operation_id: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Path template
    pub path: String,
    /// Short summary
    pub summary: Option<String>,
    /// Long description
    pub description: Option<String>,
    /// Parameters with references substituted
    pub parameters: Vec<OpenApiParameter>,
    /// Request body with schema references substituted
    pub request_body: Option<OpenApiRequestBody>,
    /// Raw response map keyed by status code
    pub responses: BTreeMap<String, OpenApiResponse>,
    /// Security requirements (operation-level, else document-level)
    pub security: Vec<SecurityRequirement>,
    /// Tags
    pub tags: Vec<String>,
    /// Whether the operation is marked deprecated
    pub deprecated: bool,
}

/// A fully parsed OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedOpenApiDocument {
    /// `info.title`, or `Untitled API`
    pub title: String,
    /// `info.description`
    pub description: Option<String>,
    /// `info.version`, or `1.0.0`
    pub version: String,
    /// First server URL, or a placeholder
    pub base_url: String,
    /// First supported security scheme
    pub auth: Option<AuthDescriptor>,
    /// Operations in path/method order
    pub operations: Vec<ParsedOpenApiOperation>,
    /// Named component schemas
    pub schemas: SchemaTable,
}
