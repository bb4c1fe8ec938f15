//! Fallback intent keyword extraction.
//!
//! Used when no keyword collaborator is configured, or when the
//! collaborator fails for a capability. The output always starts with the
//! dot-separated segments of the capability id.

use mapi_core::ParsedOpenApiOperation;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Action verbs recognized as substrings of a capability description.
pub const ACTION_VERBS: [&str; 27] = [
    "create",
    "get",
    "list",
    "update",
    "delete",
    "remove",
    "add",
    "fetch",
    "retrieve",
    "search",
    "find",
    "send",
    "post",
    "upload",
    "download",
    "subscribe",
    "unsubscribe",
    "connect",
    "disconnect",
    "start",
    "stop",
    "enable",
    "disable",
    "register",
    "unregister",
    "query",
    "execute",
];

static HEAD_NOUN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:creates?|gets?|lists?|updates?|deletes?|retrieves?|sends?|fetches?)\s+(?:a\s+)?(?:new\s+)?(\w+)",
    )
    .expect("valid regex")
});

/// Extracts keywords for a MAPI capability.
///
/// Keywords are, in order: id segments, action verbs found in `text`, and
/// the noun following the first verb of the first sentence. Duplicates
/// are removed keeping the first occurrence.
///
/// # Examples
///
/// ```
/// use mapi_parser::extract_intent_keywords;
///
/// let keywords = extract_intent_keywords("Creates a new order. Then lists it.", "orders.create");
/// assert_eq!(keywords, vec!["orders", "create", "list", "order"]);
/// ```
#[must_use]
pub fn extract_intent_keywords(text: &str, capability_id: &str) -> Vec<String> {
    let mut keywords = id_segments(capability_id);
    keywords.extend(verbs_in(text));

    let first_sentence = text.split(['.', '!', '?']).next().unwrap_or_default();
    if let Some(noun) = HEAD_NOUN_REGEX
        .captures(first_sentence)
        .and_then(|captures| captures.get(1))
    {
        keywords.push(noun.as_str().to_lowercase());
    }

    dedup(keywords)
}

/// Extracts keywords for an OpenAPI operation.
///
/// Keywords are, in order: segments of the normalized capability id,
/// action verbs found in the description (else summary, else
/// `operationId`), the lowercase HTTP method, then lowercased tags.
///
/// # Examples
///
/// ```
/// use mapi_parser::{extract_openapi_intent_keywords, parse_openapi_document};
///
/// let doc = parse_openapi_document(r#"{
///     "openapi": "3.0.0",
///     "paths": {"/users": {"get": {"operationId": "listUsers", "summary": "List users", "tags": ["Users"]}}}
/// }"#).unwrap();
///
/// let keywords = extract_openapi_intent_keywords(&doc.operations[0], "list.users");
/// assert_eq!(keywords, vec!["list", "users", "get"]);
/// ```
#[must_use]
pub fn extract_openapi_intent_keywords(
    operation: &ParsedOpenApiOperation,
    capability_id: &str,
) -> Vec<String> {
    let text = operation
        .description
        .as_deref()
        .or(operation.summary.as_deref())
        .unwrap_or(&operation.operation_id);

    let mut keywords = id_segments(capability_id);
    keywords.extend(verbs_in(text));
    keywords.push(operation.method.as_key().to_string());
    keywords.extend(operation.tags.iter().map(|tag| tag.to_lowercase()));

    dedup(keywords)
}

fn id_segments(capability_id: &str) -> Vec<String> {
    capability_id
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn verbs_in(text: &str) -> impl Iterator<Item = String> {
    let lower = text.to_lowercase();
    ACTION_VERBS
        .into_iter()
        .filter(move |verb| lower.contains(verb))
        .map(str::to_string)
}

fn dedup(keywords: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect()
}
